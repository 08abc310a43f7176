//! mdpress CLI - Markdown report converter.
//!
//! Provides commands for:
//! - `html`: Render a print-ready HTML document
//! - `pdf`: Render a paginated PDF document
//! - `blocks`: Dump the parsed block stream as JSON

mod browser;
mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BlocksArgs, HtmlArgs, PdfArgs};
use output::Output;

/// mdpress - Markdown report converter.
#[derive(Parser)]
#[command(name = "mdpress", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the report to a styled HTML document.
    Html(HtmlArgs),
    /// Convert the report to a PDF document.
    Pdf(PdfArgs),
    /// Print the parsed blocks as JSON.
    Blocks(BlocksArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Html(args) => args.verbose,
            Self::Pdf(args) => args.verbose,
            Self::Blocks(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Html(args) => args.execute(),
        Commands::Pdf(args) => args.execute(),
        Commands::Blocks(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
