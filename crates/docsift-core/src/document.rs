use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::DocsiftError;
use crate::extraction::spreadsheet::read_first_sheet;
use crate::extraction::PdfBackend;
use crate::model::{CellValue, DocumentKind, PageStub};
use crate::search::{self, CancellationToken, SearchEvent, SearchOptions, SearchOutcome};

/// A PDF registered for searching. Only page stubs are held in memory.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub source: PathBuf,
    pub pages: Vec<PageStub>,
}

/// A spreadsheet read fully into memory.
#[derive(Debug, Clone)]
pub struct TabularDocument {
    pub source: PathBuf,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// The document a search runs against. Immutable once loaded.
#[derive(Debug, Clone)]
pub enum LoadedDocument {
    Pdf(PdfDocument),
    Tabular(TabularDocument),
}

impl LoadedDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            LoadedDocument::Pdf(_) => DocumentKind::Pdf,
            LoadedDocument::Tabular(_) => DocumentKind::Tabular,
        }
    }

    pub fn source(&self) -> &Path {
        match self {
            LoadedDocument::Pdf(pdf) => &pdf.source,
            LoadedDocument::Tabular(table) => &table.source,
        }
    }

    pub fn page_count(&self) -> Option<usize> {
        match self {
            LoadedDocument::Pdf(pdf) => Some(pdf.pages.len()),
            LoadedDocument::Tabular(_) => None,
        }
    }

    pub fn columns(&self) -> Option<&[String]> {
        match self {
            LoadedDocument::Pdf(_) => None,
            LoadedDocument::Tabular(table) => Some(&table.columns),
        }
    }

    /// One-line status shown after a successful load.
    pub fn summary(&self) -> String {
        match self {
            LoadedDocument::Pdf(pdf) => {
                format!("PDF loaded - {} pages ready for search", pdf.pages.len())
            }
            LoadedDocument::Tabular(table) => format!(
                "Spreadsheet loaded - {} rows, {} columns",
                table.rows.len(),
                table.columns.len()
            ),
        }
    }
}

/// Register a PDF: verifies the file and counts its pages, extracts no text.
pub fn load_pdf(path: &Path, backend: &dyn PdfBackend) -> Result<LoadedDocument, DocsiftError> {
    let page_count = backend.page_count(path)?;
    let pages = (1..=page_count)
        .map(|page_index| PageStub {
            page_index,
            loaded: false,
        })
        .collect();

    log::info!(
        "loaded PDF {} ({} pages, backend {})",
        path.display(),
        page_count,
        backend.backend_name()
    );

    Ok(LoadedDocument::Pdf(PdfDocument {
        source: path.to_path_buf(),
        pages,
    }))
}

/// Read the first worksheet of a spreadsheet into memory.
pub fn load_tabular(path: &Path) -> Result<LoadedDocument, DocsiftError> {
    let sheet = read_first_sheet(path)?;

    log::info!(
        "loaded spreadsheet {} ({} rows, {} columns)",
        path.display(),
        sheet.rows.len(),
        sheet.columns.len()
    );

    Ok(LoadedDocument::Tabular(TabularDocument {
        source: path.to_path_buf(),
        columns: sheet.columns,
        rows: sheet.rows,
    }))
}

/// Load any supported file, dispatching on its extension.
pub fn load(path: &Path, backend: &dyn PdfBackend) -> Result<LoadedDocument, DocsiftError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => load_pdf(path, backend),
        "xlsx" | "xls" => load_tabular(path),
        _ => Err(DocsiftError::UnsupportedFormat { extension }),
    }
}

/// Owns the single active document and the backend used to read it.
pub struct Workspace {
    backend: Arc<dyn PdfBackend>,
    document: Option<LoadedDocument>,
}

impl Workspace {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Workspace {
            backend,
            document: None,
        }
    }

    /// Load a file, replacing the current document only on success.
    pub fn load(&mut self, path: &Path) -> Result<&LoadedDocument, DocsiftError> {
        let document = load(path, self.backend.as_ref())?;
        Ok(self.document.insert(document))
    }

    /// Drop the active document.
    pub fn clear(&mut self) {
        if let Some(doc) = self.document.take() {
            log::debug!("cleared {}", doc.source().display());
        }
    }

    pub fn document(&self) -> Result<&LoadedDocument, DocsiftError> {
        self.document.as_ref().ok_or(DocsiftError::NoDocumentLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn backend(&self) -> &dyn PdfBackend {
        self.backend.as_ref()
    }

    /// Run one search session against the active document.
    pub fn search<F>(
        &self,
        options: &SearchOptions,
        token: &CancellationToken,
        on_event: F,
    ) -> Result<SearchOutcome, DocsiftError>
    where
        F: FnMut(&SearchEvent),
    {
        let document = self.document()?;
        search::run(document, self.backend.as_ref(), options, token, on_event)
    }
}
