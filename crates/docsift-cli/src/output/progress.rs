use docsift_core::SearchEvent;

/// Print session progress to stderr so stdout stays clean for results.
pub fn report(event: &SearchEvent) {
    match event {
        SearchEvent::Started { total_units } => eprintln!("Searching {total_units} unit(s)..."),
        SearchEvent::Progress { fraction, message } => {
            eprintln!("[{:>3.0}%] {message}", fraction * 100.0)
        }
        SearchEvent::PageSkipped(w) => eprintln!("  warning: page {} skipped: {}", w.page, w.reason),
        SearchEvent::Canceled { .. } => eprintln!("Search canceled"),
        SearchEvent::Failed { message } => eprintln!("Search failed: {message}"),
        SearchEvent::PdfMatch(_) | SearchEvent::RowMatch(_) | SearchEvent::Completed { .. } => {}
    }
}
