use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Tabular,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::Tabular => write!(f, "Spreadsheet"),
        }
    }
}

/// Placeholder for one PDF page, created at load time without any text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStub {
    /// 1-based page number.
    pub page_index: usize,
    /// Metadata only: page text is never cached, so this stays false.
    pub loaded: bool,
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    DateTime(String),
}

impl CellValue {
    /// Missing cells (empty or error cells) are never searched.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The underlying numeric value, for integer and float cells only.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "NaN"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => {
                // Integral floats print without a fractional part (30.0 -> "30").
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::DateTime(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_float_prints_as_integer() {
        assert_eq!(CellValue::Float(30.0).to_string(), "30");
        assert_eq!(CellValue::Float(-2.0).to_string(), "-2");
    }

    #[test]
    fn fractional_float_keeps_digits() {
        assert_eq!(CellValue::Float(29.999999999).to_string(), "29.999999999");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
    }

    #[test]
    fn booleans_and_missing() {
        assert_eq!(CellValue::Bool(true).to_string(), "True");
        assert_eq!(CellValue::Empty.to_string(), "NaN");
        assert!(CellValue::Empty.is_missing());
        assert!(!CellValue::Text(String::new()).is_missing());
    }

    #[test]
    fn only_numbers_are_numeric() {
        assert_eq!(CellValue::Int(25).as_f64(), Some(25.0));
        assert_eq!(CellValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(CellValue::Text("25".into()).as_f64(), None);
        assert_eq!(CellValue::Bool(true).as_f64(), None);
    }
}
