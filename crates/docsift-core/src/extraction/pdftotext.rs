use crate::error::DocsiftError;
use crate::extraction::{PageReader, PdfBackend};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// Bytes scanned for the signature; some producers put junk before it.
const SIGNATURE_WINDOW: usize = 1024;

/// PDF extraction backend using pdftotext and pdfinfo (from poppler-utils).
///
/// Pages are extracted one at a time with `pdftotext -f N -l N` in raw
/// reading order (no `-layout`), which is the fast path for plain search.
pub struct PdftotextBackend {
    pdftotext: PathBuf,
    pdfinfo: PathBuf,
}

impl PdftotextBackend {
    pub fn new() -> Self {
        Self::with_tools("pdftotext", "pdfinfo")
    }

    /// Use explicit tool locations instead of resolving them on `PATH`.
    pub fn with_tools(pdftotext: impl Into<PathBuf>, pdfinfo: impl Into<PathBuf>) -> Self {
        PdftotextBackend {
            pdftotext: pdftotext.into(),
            pdfinfo: pdfinfo.into(),
        }
    }

    /// Check if both poppler tools are available on the system.
    pub fn is_available(&self) -> bool {
        self.pdftotext_available() && self.pdfinfo_available()
    }

    pub fn pdftotext_available(&self) -> bool {
        tool_responds(&self.pdftotext)
    }

    pub fn pdfinfo_available(&self) -> bool {
        tool_responds(&self.pdfinfo)
    }
}

impl Default for PdftotextBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for PdftotextBackend {
    fn page_count(&self, path: &Path) -> Result<usize, DocsiftError> {
        let mut file = File::open(path)?;
        check_signature(&mut file, path)?;
        drop(file);

        let output = run_tool(&self.pdfinfo, Command::new(&self.pdfinfo).arg(path)).map_err(
            |e| match e {
                DocsiftError::PopplerFailed { stderr, .. } => DocsiftError::InvalidPdf {
                    path: path.to_path_buf(),
                    reason: stderr,
                },
                other => other,
            },
        )?;
        let info = String::from_utf8_lossy(&output.stdout);
        parse_page_count(&info).ok_or_else(|| DocsiftError::InvalidPdf {
            path: path.to_path_buf(),
            reason: "pdfinfo did not report a page count".into(),
        })
    }

    fn open(&self, path: &Path) -> Result<Box<dyn PageReader + '_>, DocsiftError> {
        let file = File::open(path)?;
        log::debug!("opened {} for search", path.display());
        Ok(Box::new(PdftotextReader {
            backend: self,
            path: path.to_path_buf(),
            _file: file,
        }))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Per-session reader. The open handle proves the file was readable when the
/// session began and is released on drop; each page is still extracted by
/// running pdftotext against the path.
struct PdftotextReader<'a> {
    backend: &'a PdftotextBackend,
    path: PathBuf,
    _file: File,
}

impl PageReader for PdftotextReader<'_> {
    fn extract_page(&mut self, page_index: usize) -> Result<Option<String>, DocsiftError> {
        let page = page_index.to_string();
        let output = run_tool(
            &self.backend.pdftotext,
            Command::new(&self.backend.pdftotext)
                .args(["-f", page.as_str(), "-l", page.as_str(), "-enc", "UTF-8"])
                .arg(&self.path)
                .arg("-"), // output to stdout
        )?;

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(clean_page_text(&text))
    }
}

impl Drop for PdftotextReader<'_> {
    fn drop(&mut self) {
        log::debug!("released {}", self.path.display());
    }
}

fn run_tool(tool: &Path, command: &mut Command) -> Result<Output, DocsiftError> {
    let output = command.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DocsiftError::PopplerNotFound
        } else {
            DocsiftError::Io(e)
        }
    })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(DocsiftError::PopplerFailed {
            tool: tool.display().to_string(),
            code,
            stderr,
        });
    }

    Ok(output)
}

fn tool_responds(tool: &Path) -> bool {
    Command::new(tool)
        .arg("-v")
        .output()
        .map(|o| o.status.success() || !o.stderr.is_empty())
        .unwrap_or(false)
}

fn check_signature(file: &mut File, path: &Path) -> Result<(), DocsiftError> {
    let mut head = Vec::with_capacity(SIGNATURE_WINDOW);
    file.take(SIGNATURE_WINDOW as u64).read_to_end(&mut head)?;

    if head
        .windows(PDF_SIGNATURE.len())
        .any(|w| w == PDF_SIGNATURE)
    {
        Ok(())
    } else {
        Err(DocsiftError::InvalidPdf {
            path: path.to_path_buf(),
            reason: "missing %PDF- header".into(),
        })
    }
}

fn parse_page_count(info: &str) -> Option<usize> {
    info.lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|rest| rest.trim().parse().ok())
}

/// pdftotext ends every page with a form feed; whitespace-only pages have no text.
fn clean_page_text(raw: &str) -> Option<String> {
    let text = raw.trim_end_matches(['\x0c', '\n', '\r']);
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_page_count() {
        let info = "Title:          Report\n\
                    Producer:       LibreOffice\n\
                    Pages:          12\n\
                    Encrypted:      no\n";
        assert_eq!(parse_page_count(info), Some(12));
        assert_eq!(parse_page_count("Title: x\n"), None);
    }

    #[test]
    fn test_clean_page_text() {
        assert_eq!(
            clean_page_text("hello\nworld\n\x0c"),
            Some("hello\nworld".to_string())
        );
        assert_eq!(clean_page_text("  \n\x0c"), None);
        assert_eq!(clean_page_text(""), None);
    }

    #[test]
    fn test_signature_rejects_non_pdf() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"PK\x03\x04 definitely a zip").unwrap();
        let mut file = File::open(tmp.path()).unwrap();
        let err = check_signature(&mut file, tmp.path()).unwrap_err();
        assert!(matches!(err, DocsiftError::InvalidPdf { .. }));
    }

    #[test]
    fn test_signature_accepts_pdf_header() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj").unwrap();
        let mut file = File::open(tmp.path()).unwrap();
        assert!(check_signature(&mut file, tmp.path()).is_ok());
    }

    #[test]
    fn test_open_takes_a_handle_per_session() {
        let backend = PdftotextBackend::new();
        let err = backend
            .open(Path::new("/nonexistent/report.pdf"))
            .err()
            .unwrap();
        assert!(matches!(err, DocsiftError::Io(_)));

        let tmp = tempfile::NamedTempFile::new().unwrap();
        let first = backend.open(tmp.path()).unwrap();
        let second = backend.open(tmp.path()).unwrap();
        drop(first);
        drop(second);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let backend = PdftotextBackend::new();
        let err = backend
            .page_count(Path::new("/nonexistent/report.pdf"))
            .unwrap_err();
        assert!(matches!(err, DocsiftError::Io(_)));
    }
}
