//! On-demand search over a single PDF or spreadsheet.
//!
//! Loading is cheap: PDFs are only counted, spreadsheets are read into
//! memory once. Searching walks the document sequentially, extracts PDF page
//! text only when a session reaches that page, and stops cooperatively when
//! its [`CancellationToken`] is set.

pub mod document;
pub mod error;
pub mod extraction;
pub mod model;
pub mod render;
pub mod results;
pub mod search;

pub use document::{LoadedDocument, Workspace};
pub use error::DocsiftError;
pub use results::{Matches, PageWarning, PdfMatch, RowMatch};
pub use search::{CancellationToken, SearchEvent, SearchOptions, SearchOutcome, SessionState};
