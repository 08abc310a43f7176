//! `mdpress html` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpress_config::{CliSettings, Config};
use mdpress_html::HtmlOptions;

use crate::browser;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the html command.
#[derive(Args)]
pub(crate) struct HtmlArgs {
    /// Markdown report to convert (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output HTML file (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document title (default: first H1 heading).
    #[arg(long)]
    title: Option<String>,

    /// Do not open the result in a browser.
    #[arg(long)]
    no_open: bool,

    /// Path to configuration file (default: auto-discover mdpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl HtmlArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            html_output: self.output,
            title: self.title,
            open_browser: self.no_open.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let html = &config.html_resolved;

        let options = HtmlOptions {
            title: html.title.clone(),
            print_button: html.print_button,
            ..HtmlOptions::default()
        };

        output.info(&format!("Converting {}...", config.input_path.display()));
        let summary = mdpress_html::convert_file(&config.input_path, &html.output, &options)?;
        output.file_created("HTML", &html.output, &format!("{} bytes", summary.bytes));
        output.info(&format!("Title: {}", summary.title));

        if html.open_browser {
            match browser::open_path(&html.output) {
                Ok(()) => output.info("Opened in browser"),
                Err(err) => output.warning(&format!("Could not open browser: {err}")),
            }
        }

        output.highlight("To save as PDF: press Ctrl+P (Cmd+P) and choose \"Save as PDF\"");
        Ok(())
    }
}
