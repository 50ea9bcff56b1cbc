use std::collections::HashSet;

use crate::document::PdfDocument;
use crate::error::DocsiftError;
use crate::extraction::PdfBackend;
use crate::results::{Matches, PageWarning, PdfMatch};
use crate::search::{
    contains, fold_query, CancellationToken, SearchEvent, SearchOptions, SearchOutcome, Session,
};

/// Progress is reported after every this many pages.
pub const PROGRESS_INTERVAL: usize = 10;

/// Search a PDF page by page, extracting each page's text on demand.
///
/// Nothing is cached between sessions: every search re-extracts every page
/// it visits.
pub(crate) fn search<F>(
    doc: &PdfDocument,
    backend: &dyn PdfBackend,
    options: &SearchOptions,
    token: &CancellationToken,
    on_event: F,
) -> Result<SearchOutcome, DocsiftError>
where
    F: FnMut(&SearchEvent),
{
    let total_pages = doc.pages.len();
    let mut session = Session::start(token, on_event, total_pages);

    let mut reader = match backend.open(&doc.source) {
        Ok(reader) => reader,
        Err(e) => return Err(session.fail(e)),
    };

    let needle = fold_query(options.query(), options.case_sensitive);
    let mut matches = Vec::new();

    for stub in &doc.pages {
        if !session.checkpoint() {
            break;
        }

        let page = stub.page_index;
        match reader.extract_page(page) {
            Ok(Some(text)) => {
                for found in page_matches(page, &text, &needle, options.case_sensitive) {
                    session.emit(SearchEvent::PdfMatch(found.clone()));
                    matches.push(found);
                }
            }
            Ok(None) => log::debug!("page {page} has no text"),
            // Without the extractor no page can succeed.
            Err(DocsiftError::PopplerNotFound) => {
                return Err(session.fail(DocsiftError::PopplerNotFound));
            }
            Err(e) => session.warn(PageWarning {
                page,
                reason: e.to_string(),
            }),
        }

        let inspected = session.unit_done();
        if inspected % PROGRESS_INTERVAL == 0 {
            session.emit(SearchEvent::Progress {
                fraction: inspected as f64 / total_pages as f64,
                message: format!("Searching page {inspected}/{total_pages}..."),
            });
        }
    }

    drop(reader);
    Ok(session.finish(options.query(), Matches::Pdf(matches)))
}

/// Find every line of one page containing `needle` and build its context.
///
/// `needle` is expected to be case-folded already when `case_sensitive` is
/// false. Identical contexts on the same page are reported once.
pub fn page_matches(page: usize, text: &str, needle: &str, case_sensitive: bool) -> Vec<PdfMatch> {
    // Most pages miss; skip the per-line work for them.
    if !contains(text, needle, case_sensitive) {
        log::debug!("page {page}: no match");
        return Vec::new();
    }

    let lines: Vec<&str> = text.lines().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !contains(line, needle, case_sensitive) {
            continue;
        }

        let start = i.saturating_sub(1);
        let end = (i + 2).min(lines.len());
        let context = lines[start..end].join("\n").trim().to_string();

        if !context.is_empty() && seen.insert(context.clone()) {
            out.push(PdfMatch {
                page,
                context,
                line_number: i + 1,
            });
        }
    }

    out
}
