use docsift_core::extraction::pdftotext::PdftotextBackend;
use docsift_core::{DocsiftError, Workspace};
use std::path::PathBuf;
use std::sync::Arc;

pub fn run(input_file: PathBuf) -> Result<(), DocsiftError> {
    let mut workspace = Workspace::new(Arc::new(PdftotextBackend::new()));
    let document = workspace.load(&input_file)?;

    println!("{}", document.summary());
    println!("  Kind: {}", document.kind());
    println!("  Source: {}", document.source().display());

    if let Some(pages) = document.page_count() {
        println!("  Pages: {pages}");
    }
    if let Some(columns) = document.columns() {
        println!("  Columns:");
        for (i, col) in columns.iter().enumerate() {
            println!("    {:>3}  {}", i + 1, col);
        }
    }

    Ok(())
}
