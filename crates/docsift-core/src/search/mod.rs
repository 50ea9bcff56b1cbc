//! Search sessions over a loaded document.
//!
//! A session is one call to [`run`]. It validates its inputs, then walks the
//! document strictly in order (pages for PDFs, rows for spreadsheets),
//! sampling the [`CancellationToken`] once before each unit of work and
//! reporting what it finds through [`SearchEvent`]s.

pub mod pdf;
pub mod tabular;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::document::LoadedDocument;
use crate::error::DocsiftError;
use crate::extraction::PdfBackend;
use crate::results::{Matches, PageWarning, PdfMatch, RowMatch};

/// What to look for. Construct with [`SearchOptions::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    query: String,
    pub case_sensitive: bool,
    /// Columns to search; required for spreadsheets, ignored for PDFs.
    pub columns: Vec<String>,
}

impl SearchOptions {
    /// Trims the query and rejects it if nothing is left.
    pub fn new(query: &str, case_sensitive: bool) -> Result<Self, DocsiftError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DocsiftError::EmptyQuery);
        }
        Ok(SearchOptions {
            query: query.to_string(),
            case_sensitive,
            columns: Vec::new(),
        })
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Cooperative cancellation shared between the caller and a running session.
///
/// Clones observe the same flag, so a UI thread can keep one clone and hand
/// the other to the worker running the search.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Lifecycle of a session: `Idle -> Running -> Completed | Canceled | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    Completed,
    Canceled,
    Failed,
}

impl SessionState {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Idle, Running) | (Running, Completed) | (Running, Canceled) | (Running, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Canceled | SessionState::Failed
        )
    }
}

/// Events emitted while a session runs, in order: `Started`, any number of
/// `Progress`/`Match`/`PageSkipped`, then exactly one terminal event.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Started { total_units: usize },
    Progress { fraction: f64, message: String },
    PdfMatch(PdfMatch),
    RowMatch(RowMatch),
    PageSkipped(PageWarning),
    Completed { matches: usize },
    Canceled { matches: usize },
    Failed { message: String },
}

/// Result of a session that ran to completion or was canceled.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub state: SessionState,
    pub query: String,
    pub matches: Matches,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PageWarning>,
    /// Pages or rows fully processed before the session ended.
    pub units_inspected: usize,
}

impl SearchOutcome {
    pub fn is_canceled(&self) -> bool {
        self.state == SessionState::Canceled
    }
}

/// Bookkeeping for one session: state machine plus accumulated output.
pub(crate) struct Session<'a, F> {
    state: SessionState,
    token: &'a CancellationToken,
    on_event: F,
    units_inspected: usize,
    warnings: Vec<PageWarning>,
}

impl<'a, F> Session<'a, F>
where
    F: FnMut(&SearchEvent),
{
    pub(crate) fn start(token: &'a CancellationToken, on_event: F, total_units: usize) -> Self {
        let mut session = Session {
            state: SessionState::Idle,
            token,
            on_event,
            units_inspected: 0,
            warnings: Vec::new(),
        };
        session.transition(SessionState::Running);
        session.emit(SearchEvent::Started { total_units });
        session
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid session transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    /// The only place the cancellation flag is sampled.
    pub(crate) fn checkpoint(&mut self) -> bool {
        if self.token.is_canceled() {
            self.transition(SessionState::Canceled);
            false
        } else {
            true
        }
    }

    pub(crate) fn emit(&mut self, event: SearchEvent) {
        (self.on_event)(&event);
    }

    pub(crate) fn unit_done(&mut self) -> usize {
        self.units_inspected += 1;
        self.units_inspected
    }

    pub(crate) fn warn(&mut self, warning: PageWarning) {
        log::warn!("could not search page {}: {}", warning.page, warning.reason);
        self.emit(SearchEvent::PageSkipped(warning.clone()));
        self.warnings.push(warning);
    }

    pub(crate) fn fail(mut self, error: DocsiftError) -> DocsiftError {
        self.transition(SessionState::Failed);
        log::info!("search failed after {} units: {error}", self.units_inspected);
        self.emit(SearchEvent::Failed {
            message: error.to_string(),
        });
        error
    }

    pub(crate) fn finish(mut self, query: &str, matches: Matches) -> SearchOutcome {
        let count = matches.len();
        if self.state == SessionState::Running {
            self.transition(SessionState::Completed);
        }
        let event = match self.state {
            SessionState::Canceled => SearchEvent::Canceled { matches: count },
            _ => SearchEvent::Completed { matches: count },
        };
        log::info!(
            "search for '{}' {:?} with {} matches after {} units",
            query,
            self.state,
            count,
            self.units_inspected
        );
        self.emit(event);

        SearchOutcome {
            state: self.state,
            query: query.to_string(),
            matches,
            warnings: self.warnings,
            units_inspected: self.units_inspected,
        }
    }
}

/// Run one search session against `document`.
///
/// Input validation errors are returned before any event is emitted. A
/// session that cannot read the document at all emits `Failed` and returns
/// the error; per-page failures only produce warnings.
pub fn run<F>(
    document: &LoadedDocument,
    backend: &dyn PdfBackend,
    options: &SearchOptions,
    token: &CancellationToken,
    on_event: F,
) -> Result<SearchOutcome, DocsiftError>
where
    F: FnMut(&SearchEvent),
{
    if options.query.trim().is_empty() {
        return Err(DocsiftError::EmptyQuery);
    }

    match document {
        LoadedDocument::Pdf(pdf) => pdf::search(pdf, backend, options, token, on_event),
        LoadedDocument::Tabular(table) => tabular::search(table, options, token, on_event),
    }
}

/// Containment check honoring the case rule. `needle` must already be
/// lowercased when `case_sensitive` is false.
pub(crate) fn contains(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.contains(needle)
    } else {
        haystack.to_lowercase().contains(needle)
    }
}

pub(crate) fn fold_query(query: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        query.to_string()
    } else {
        query.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_blank_query_is_rejected() {
        assert!(matches!(
            SearchOptions::new("", false),
            Err(DocsiftError::EmptyQuery)
        ));
        assert!(matches!(
            SearchOptions::new("   \t", true),
            Err(DocsiftError::EmptyQuery)
        ));
    }

    #[test]
    fn query_is_trimmed() {
        let opts = SearchOptions::new("  hello ", false).unwrap();
        assert_eq!(opts.query(), "hello");
    }

    #[test]
    fn token_clones_share_the_flag() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!token.is_canceled());
        handle.cancel();
        assert!(token.is_canceled());
    }

    #[test]
    fn token_can_be_canceled_from_another_thread() {
        let token = CancellationToken::new();
        let handle = token.clone();
        std::thread::spawn(move || handle.cancel()).join().unwrap();
        assert!(token.is_canceled());
    }

    #[test]
    fn lifecycle_only_moves_forward() {
        use SessionState::*;
        assert!(Idle.can_transition_to(Running));
        assert!(Running.can_transition_to(Completed));
        assert!(Running.can_transition_to(Canceled));
        assert!(Running.can_transition_to(Failed));
        assert!(!Idle.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Running));
        assert!(!Canceled.can_transition_to(Completed));
        assert!(!Idle.is_terminal());
        assert!(Failed.is_terminal());
    }

    #[test]
    fn session_runs_from_idle_to_completed() {
        let token = CancellationToken::new();
        let mut events = Vec::new();
        let session = Session::start(&token, |e: &SearchEvent| events.push(e.clone()), 0);
        assert_eq!(session.state, SessionState::Running);

        let outcome = session.finish("q", Matches::Pdf(Vec::new()));
        assert_eq!(outcome.state, SessionState::Completed);
        assert!(matches!(events[0], SearchEvent::Started { total_units: 0 }));
        assert!(matches!(events[1], SearchEvent::Completed { matches: 0 }));
    }

    #[test]
    fn containment_case_rules() {
        assert!(contains("Hello World", "world", false));
        assert!(!contains("Hello World", "world", true));
        assert!(contains("Hello World", "World", true));
    }
}
