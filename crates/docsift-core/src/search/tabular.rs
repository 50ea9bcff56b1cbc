use indexmap::IndexMap;

use crate::document::TabularDocument;
use crate::error::DocsiftError;
use crate::model::CellValue;
use crate::results::{Matches, RowMatch};
use crate::search::{
    contains, fold_query, CancellationToken, SearchEvent, SearchOptions, SearchOutcome, Session,
};

/// Absolute tolerance for numeric equality between the query and a cell.
pub const NUMERIC_EPSILON: f64 = 1e-10;

/// Row numbers are reported as the spreadsheet shows them: 1-based, after
/// one header row.
pub const HEADER_ROW_OFFSET: usize = 2;

/// Search the selected columns of every row, in file order.
pub(crate) fn search<F>(
    doc: &TabularDocument,
    options: &SearchOptions,
    token: &CancellationToken,
    on_event: F,
) -> Result<SearchOutcome, DocsiftError>
where
    F: FnMut(&SearchEvent),
{
    let selected = resolve_columns(&doc.columns, &options.columns)?;
    let matcher = CellMatcher::new(options.query(), options.case_sensitive);

    let mut session = Session::start(token, on_event, doc.rows.len());
    let mut matches = Vec::new();

    for (idx, row) in doc.rows.iter().enumerate() {
        if !session.checkpoint() {
            break;
        }

        let matched_columns: Vec<String> = selected
            .iter()
            .filter(|&&col| row.get(col).is_some_and(|cell| matcher.matches(cell)))
            .map(|&col| doc.columns[col].clone())
            .collect();

        if !matched_columns.is_empty() {
            let found = RowMatch {
                row_index: idx + HEADER_ROW_OFFSET,
                matched_columns,
                row_data: row_data(&doc.columns, row),
            };
            session.emit(SearchEvent::RowMatch(found.clone()));
            matches.push(found);
        }

        session.unit_done();
    }

    Ok(session.finish(options.query(), Matches::Tabular(matches)))
}

/// Map selected names to column positions, de-duplicated, in file order.
fn resolve_columns(columns: &[String], selected: &[String]) -> Result<Vec<usize>, DocsiftError> {
    if selected.is_empty() {
        return Err(DocsiftError::NoColumnsSelected);
    }

    let mut positions = Vec::with_capacity(selected.len());
    for name in selected {
        let pos = columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DocsiftError::UnknownColumn {
                column: name.clone(),
            })?;
        positions.push(pos);
    }

    positions.sort_unstable();
    positions.dedup();
    Ok(positions)
}

fn row_data(columns: &[String], row: &[CellValue]) -> IndexMap<String, CellValue> {
    columns.iter().cloned().zip(row.iter().cloned()).collect()
}

/// Per-cell matching rule: text containment, or numeric near-equality when
/// the query parses as a number and the cell holds one.
#[derive(Debug, Clone)]
pub struct CellMatcher {
    needle: String,
    case_sensitive: bool,
    numeric_query: Option<f64>,
}

impl CellMatcher {
    pub fn new(query: &str, case_sensitive: bool) -> Self {
        let query = query.trim();
        CellMatcher {
            needle: fold_query(query, case_sensitive),
            case_sensitive,
            numeric_query: query.parse::<f64>().ok(),
        }
    }

    pub fn matches(&self, cell: &CellValue) -> bool {
        if cell.is_missing() {
            return false;
        }

        if contains(&cell.to_string(), &self.needle, self.case_sensitive) {
            return true;
        }

        match (self.numeric_query, cell.as_f64()) {
            (Some(query), Some(value)) => (value - query).abs() < NUMERIC_EPSILON,
            _ => false,
        }
    }
}
