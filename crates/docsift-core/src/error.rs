use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DocsiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid PDF file {path}: {reason}")]
    InvalidPdf { path: PathBuf, reason: String },

    #[error("failed to read spreadsheet: {0}")]
    Format(String),

    #[error("unsupported file format '{extension}'. Please select a PDF, XLSX or XLS file")]
    UnsupportedFormat { extension: String },

    #[error("no document loaded. Load a PDF or spreadsheet first")]
    NoDocumentLoaded,

    #[error("search query is empty")]
    EmptyQuery,

    #[error("select at least one column to search")]
    NoColumnsSelected,

    #[error("column '{column}' does not exist in the loaded spreadsheet")]
    UnknownColumn { column: String },

    #[error("no results to export")]
    NothingToExport,

    #[error("poppler tools not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PopplerNotFound,

    #[error("{tool} failed with exit code {code}: {stderr}")]
    PopplerFailed {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<calamine::Error> for DocsiftError {
    fn from(e: calamine::Error) -> Self {
        DocsiftError::Format(e.to_string())
    }
}
