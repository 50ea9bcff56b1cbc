mod commands;
mod interrupt;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docsift",
    version,
    about = "Search the text of a PDF or the cells of a spreadsheet"
)]
struct Cli {
    /// Log extraction details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a PDF, XLSX or XLS file
    Search {
        /// Path to PDF, XLSX or XLS file
        input_file: PathBuf,

        /// Text (or number, for spreadsheets) to look for
        query: String,

        /// Spreadsheet column(s) to search; required for XLSX/XLS
        #[arg(short = 'c', long = "column", value_name = "NAME")]
        columns: Vec<String>,

        /// Match case exactly
        #[arg(long)]
        case_sensitive: bool,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Write the text results to a file
        #[arg(short, long = "export", value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Show what a file looks like to the search engine (pages or columns)
    Info {
        /// Path to PDF, XLSX or XLS file
        input_file: PathBuf,
    },
    /// Check that the PDF extraction tools are installed
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Search {
            input_file,
            query,
            columns,
            case_sensitive,
            output,
            export,
        } => commands::search::run(input_file, &query, columns, case_sensitive, &output, export),
        Commands::Info { input_file } => commands::info::run(input_file),
        Commands::Doctor => commands::doctor::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
