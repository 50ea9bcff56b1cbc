//! Plain-text rendering and export of search results.
//!
//! Rendering is pure formatting: the same records always produce the same
//! bytes, so callers can diff or store the output.

use std::path::Path;

use crate::error::DocsiftError;
use crate::results::{Matches, PdfMatch, RowMatch};

const NO_MATCHES: &str = "No matches found.";

pub fn render_pdf_results(records: &[PdfMatch], query: &str) -> String {
    if records.is_empty() {
        return NO_MATCHES.to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("PDF Search Results for: '{query}'\n"));
    out.push_str(&format!("{}\n\n", "=".repeat(50)));

    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!("Result #{} - Page {}:\n", i + 1, record.page));
        out.push_str(&format!("{}\n", "-".repeat(30)));
        out.push_str(&record.context);
        out.push_str("\n\n");
    }

    out
}

/// Render spreadsheet matches. Every row lists all of `all_columns`, with
/// matched columns marked by a star.
pub fn render_tabular_results(records: &[RowMatch], query: &str, all_columns: &[String]) -> String {
    if records.is_empty() {
        return NO_MATCHES.to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Spreadsheet Search Results for: '{query}'\n"));
    out.push_str(&format!("{}\n\n", "=".repeat(50)));

    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!("Result #{} - Row {}:\n", i + 1, record.row_index));
        out.push_str(&format!(
            "Matched columns: {}\n",
            record.matched_columns.join(", ")
        ));
        out.push_str(&format!("{}\n", "-".repeat(50)));

        for col in all_columns {
            let value = record
                .row_data
                .get(col)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "NaN".to_string());
            let marker = if record.matched_columns.contains(col) {
                "★ "
            } else {
                "  "
            };
            out.push_str(&format!("{marker}{col}: {value}\n"));
        }

        out.push('\n');
    }

    out
}

/// Render whichever kind of matches a session produced.
pub fn render_matches(matches: &Matches, query: &str, all_columns: &[String]) -> String {
    match matches {
        Matches::Pdf(records) => render_pdf_results(records, query),
        Matches::Tabular(records) => render_tabular_results(records, query, all_columns),
    }
}

/// Short result count for a status line.
pub fn render_summary(count: usize) -> String {
    if count == 0 {
        "No results".to_string()
    } else {
        format!("{count} result(s) found")
    }
}

/// Write rendered results to `path` verbatim as UTF-8.
///
/// Refuses to write anything when there is nothing to export.
pub fn export_results(rendered: &str, path: &Path) -> Result<(), DocsiftError> {
    if rendered.trim().is_empty() {
        return Err(DocsiftError::NothingToExport);
    }
    std::fs::write(path, rendered)?;
    log::info!("exported results to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use indexmap::IndexMap;

    fn row(index: usize, matched: &[&str], data: &[(&str, CellValue)]) -> RowMatch {
        RowMatch {
            row_index: index,
            matched_columns: matched.iter().map(|s| s.to_string()).collect(),
            row_data: data
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn pdf_rendering_is_exact() {
        let records = vec![
            PdfMatch {
                page: 2,
                context: "before\nsay hello\nafter".into(),
                line_number: 5,
            },
            PdfMatch {
                page: 7,
                context: "hello again".into(),
                line_number: 1,
            },
        ];

        let expected = format!(
            "PDF Search Results for: 'hello'\n{}\n\n\
             Result #1 - Page 2:\n{}\nbefore\nsay hello\nafter\n\n\
             Result #2 - Page 7:\n{}\nhello again\n\n",
            "=".repeat(50),
            "-".repeat(30),
            "-".repeat(30),
        );
        assert_eq!(render_pdf_results(&records, "hello"), expected);
    }

    #[test]
    fn tabular_rendering_marks_matched_columns() {
        let columns = vec!["Name".to_string(), "Age".to_string()];
        let records = vec![row(
            2,
            &["Age"],
            &[
                ("Name", CellValue::Text("Alice".into())),
                ("Age", CellValue::Float(25.0)),
            ],
        )];

        let expected = format!(
            "Spreadsheet Search Results for: '25'\n{}\n\n\
             Result #1 - Row 2:\nMatched columns: Age\n{}\n  Name: Alice\n★ Age: 25\n\n",
            "=".repeat(50),
            "-".repeat(50),
        );
        assert_eq!(render_tabular_results(&records, "25", &columns), expected);
    }

    #[test]
    fn missing_values_render_as_nan() {
        let columns = vec!["Name".to_string(), "Note".to_string()];
        let records = vec![row(
            3,
            &["Name"],
            &[
                ("Name", CellValue::Text("Bob".into())),
                ("Note", CellValue::Empty),
            ],
        )];
        let text = render_tabular_results(&records, "bob", &columns);
        assert!(text.contains("  Note: NaN\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let records = vec![PdfMatch {
            page: 1,
            context: "hello".into(),
            line_number: 1,
        }];
        assert_eq!(
            render_pdf_results(&records, "hello"),
            render_pdf_results(&records, "hello")
        );
    }

    #[test]
    fn empty_results_say_so() {
        assert_eq!(render_pdf_results(&[], "x"), "No matches found.");
        assert_eq!(render_tabular_results(&[], "x", &[]), "No matches found.");
        assert_eq!(render_summary(0), "No results");
        assert_eq!(render_summary(3), "3 result(s) found");
    }

    #[test]
    fn export_writes_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let text = "PDF Search Results for: 'å'\nkontext ★\n";
        export_results(text, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn export_without_results_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let err = export_results("  \n", &path).unwrap_err();
        assert!(matches!(err, DocsiftError::NothingToExport));
        assert!(!path.exists());
    }

    #[test]
    fn export_to_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.txt");
        let err = export_results("data", &path).unwrap_err();
        assert!(matches!(err, DocsiftError::Io(_)));
    }
}
