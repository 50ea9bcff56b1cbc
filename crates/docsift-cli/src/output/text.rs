use docsift_core::render::render_summary;
use docsift_core::SearchOutcome;

pub fn print(rendered: &str, outcome: &SearchOutcome) {
    println!("{}", rendered.trim_end());

    if outcome.is_canceled() {
        println!(
            "\nSearch canceled after {} unit(s) - partial results",
            outcome.units_inspected
        );
    }
    if !outcome.warnings.is_empty() {
        println!("\n{} page(s) could not be searched", outcome.warnings.len());
    }

    println!("\n{}", render_summary(outcome.matches.len()));
}
