use docsift_core::{DocsiftError, SearchOutcome};

pub fn print(outcome: &SearchOutcome) -> Result<(), DocsiftError> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{json}");
    Ok(())
}
