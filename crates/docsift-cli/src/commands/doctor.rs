use docsift_core::extraction::pdftotext::PdftotextBackend;
use docsift_core::DocsiftError;

pub fn run() -> Result<(), DocsiftError> {
    let backend = PdftotextBackend::new();

    let status = |ok: bool| if ok { "found" } else { "MISSING" };
    println!("  pdftotext  {}", status(backend.pdftotext_available()));
    println!("  pdfinfo    {}", status(backend.pdfinfo_available()));

    if backend.is_available() {
        println!("\nPDF search is ready. Spreadsheets need no external tools.");
        Ok(())
    } else {
        Err(DocsiftError::PopplerNotFound)
    }
}
