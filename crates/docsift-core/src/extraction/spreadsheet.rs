use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::error::DocsiftError;
use crate::model::CellValue;

/// A worksheet read fully into memory: header names plus data rows.
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub columns: Vec<String>,
    /// Each row is padded to `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

/// Read the first worksheet of an `.xlsx` or `.xls` workbook.
///
/// The first row of the used range is the header. Empty header cells are
/// named `Unnamed: <position>` and repeated names get `.1`, `.2`, ...
/// suffixes so every column can be selected unambiguously.
pub fn read_first_sheet(path: &Path) -> Result<SheetData, DocsiftError> {
    // Surface missing/unreadable files as IO errors, not format errors.
    std::fs::File::open(path)?;

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DocsiftError::Format(format!("failed to open workbook: {e}")))?;

    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DocsiftError::Format("workbook has no worksheets".into()))??;

    let mut rows = sheet.rows();
    let header = rows
        .next()
        .ok_or_else(|| DocsiftError::Format("first worksheet is empty".into()))?;

    let columns = column_names(header);
    let width = columns.len();

    let rows = rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().take(width).map(cell_value).collect();
            cells.resize(width, CellValue::Empty);
            cells
        })
        .collect();

    Ok(SheetData { columns, rows })
}

/// Header names with blanks filled in and duplicates suffixed `.1`, `.2`.
/// A suffixed name that collides with a later header is suffixed again, so
/// every returned name is unique.
fn column_names(header: &[Data]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());

    for (i, cell) in header.iter().enumerate() {
        let mut name = match cell_as_string(cell) {
            Some(name) => name,
            None => format!("Unnamed: {i}"),
        };

        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{name}.{count}");
            count = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), count + 1);
        names.push(name);
    }

    names
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        other => Some(cell_value(other).to_string()),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(parsed) => CellValue::DateTime(parsed.to_string()),
            None => CellValue::DateTime(dt.to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::DateTime(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn header_names_keep_file_order() {
        let names = column_names(&[text("Name"), text("Age"), text("City")]);
        assert_eq!(names, vec!["Name", "Age", "City"]);
    }

    #[test]
    fn empty_header_cells_are_unnamed() {
        let names = column_names(&[text("Name"), Data::Empty, text("  ")]);
        assert_eq!(names, vec!["Name", "Unnamed: 1", "Unnamed: 2"]);
    }

    #[test]
    fn duplicate_headers_get_suffixes() {
        let names = column_names(&[text("Score"), text("Score"), text("Score")]);
        assert_eq!(names, vec!["Score", "Score.1", "Score.2"]);
    }

    #[test]
    fn suffixed_names_never_collide_with_real_headers() {
        let names = column_names(&[text("X"), text("X"), text("X.1")]);
        assert_eq!(names, vec!["X", "X.1", "X.1.1"]);

        let names = column_names(&[text("X.1"), text("X"), text("X")]);
        assert_eq!(names, vec!["X.1", "X", "X.1.1"]);

        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn numeric_header_is_stringified() {
        let names = column_names(&[Data::Float(2024.0), Data::Int(7)]);
        assert_eq!(names, vec!["2024", "7"]);
    }

    #[test]
    fn error_cells_are_missing() {
        let cell = Data::Error(calamine::CellErrorType::Div0);
        assert_eq!(cell_value(&cell), CellValue::Empty);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_first_sheet(Path::new("/nonexistent/book.xlsx")).unwrap_err();
        assert!(matches!(err, DocsiftError::Io(_)));
    }

    #[test]
    fn garbage_workbook_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();
        let err = read_first_sheet(&path).unwrap_err();
        assert!(matches!(err, DocsiftError::Format(_)));
    }
}
