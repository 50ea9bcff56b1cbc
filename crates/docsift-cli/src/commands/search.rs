use docsift_core::extraction::pdftotext::PdftotextBackend;
use docsift_core::extraction::PdfBackend;
use docsift_core::render::{export_results, render_matches};
use docsift_core::{CancellationToken, DocsiftError, SearchOptions, Workspace};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{interrupt, output};

pub fn run(
    input_file: PathBuf,
    query: &str,
    columns: Vec<String>,
    case_sensitive: bool,
    output_format: &str,
    export: Option<PathBuf>,
) -> Result<(), DocsiftError> {
    let mut workspace = Workspace::new(Arc::new(PdftotextBackend::new()));
    log::debug!("using {} backend", workspace.backend().backend_name());
    let document = workspace.load(&input_file)?;
    eprintln!("{}", document.summary());

    let options = SearchOptions::new(query, case_sensitive)?.with_columns(columns);
    let token = CancellationToken::new();
    if let Err(e) = interrupt::cancel_on_ctrl_c(&token) {
        log::warn!("Ctrl+C will not cancel this search: {e}");
    }
    let outcome = workspace.search(&options, &token, output::progress::report)?;

    let all_columns = workspace
        .document()?
        .columns()
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    let rendered = render_matches(&outcome.matches, options.query(), &all_columns);

    match output_format {
        "json" => output::json::print(&outcome)?,
        _ => output::text::print(&rendered, &outcome),
    }

    if let Some(path) = export {
        // Only real results are exported, never the "No matches" placeholder.
        if outcome.matches.is_empty() {
            eprintln!("Warning: no results to export, {} not written", path.display());
        } else {
            export_results(&rendered, &path)?;
            eprintln!("Results exported to {}", path.display());
        }
    }

    Ok(())
}
