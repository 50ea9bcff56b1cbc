use indexmap::IndexMap;
use serde::Serialize;

use crate::model::CellValue;

/// A matching line on a PDF page, with one line of context either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfMatch {
    /// 1-based page number.
    pub page: usize,
    pub context: String,
    /// 1-based line of the match within the page text.
    pub line_number: usize,
}

/// A spreadsheet row where at least one selected column matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowMatch {
    /// Row number as the spreadsheet shows it (first data row is 2).
    pub row_index: usize,
    /// Every selected column that matched, in file column order.
    pub matched_columns: Vec<String>,
    /// The whole row, all columns in file order.
    pub row_data: IndexMap<String, CellValue>,
}

/// A page that could not be searched. The session carries on without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWarning {
    pub page: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "lowercase")]
pub enum Matches {
    Pdf(Vec<PdfMatch>),
    Tabular(Vec<RowMatch>),
}

impl Matches {
    pub fn len(&self) -> usize {
        match self {
            Matches::Pdf(records) => records.len(),
            Matches::Tabular(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
