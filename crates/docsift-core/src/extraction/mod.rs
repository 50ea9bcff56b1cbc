pub mod pdftotext;
pub mod spreadsheet;

use std::path::Path;

use crate::error::DocsiftError;

/// Trait for PDF text extraction backends.
///
/// Loading only asks for the page count; page text is pulled one page at a
/// time through a [`PageReader`] opened for the duration of a search.
pub trait PdfBackend: Send + Sync {
    /// Count the pages of a PDF without extracting any text.
    fn page_count(&self, path: &Path) -> Result<usize, DocsiftError>;

    /// Open the document for one search session.
    fn open(&self, path: &Path) -> Result<Box<dyn PageReader + '_>, DocsiftError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Per-session access to page text. Dropping the reader releases the file.
pub trait PageReader {
    /// Extract the plain text of one 1-based page, `None` when it has no text.
    fn extract_page(&mut self, page_index: usize) -> Result<Option<String>, DocsiftError>;
}
