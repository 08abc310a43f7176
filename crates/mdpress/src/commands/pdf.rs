//! `mdpress pdf` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpress_config::{CliSettings, Config, PdfEngine};
use mdpress_pdf::PdfOptions;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pdf command.
#[derive(Args)]
pub(crate) struct PdfArgs {
    /// Markdown report to convert (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output PDF file (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Markdown front-end: `lines` or `cmark` (overrides config).
    #[arg(short, long)]
    engine: Option<PdfEngine>,

    /// Path to configuration file (default: auto-discover mdpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PdfArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            pdf_output: self.output,
            engine: self.engine,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let pdf = &config.pdf_resolved;
        let options = PdfOptions::from(pdf);

        output.info(&format!(
            "Converting {} ({} engine)...",
            config.input_path.display(),
            pdf.engine
        ));
        let summary = mdpress_pdf::convert_file(&config.input_path, &pdf.output, &options)?;
        output.file_created("PDF", &pdf.output, &format!("{} pages", summary.pages));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.md"), "# Notes\n\n- one\n- two\n").unwrap();
        let config_path = dir.path().join("mdpress.toml");
        std::fs::write(
            &config_path,
            "[input]\npath = \"notes.md\"\n\n[pdf]\noutput = \"build/notes.pdf\"\npage_size = \"letter\"\n",
        )
        .unwrap();

        let args = PdfArgs {
            input: None,
            output: None,
            engine: Some(PdfEngine::Cmark),
            config: Some(config_path),
            verbose: false,
        };
        args.execute().unwrap();

        let bytes = std::fs::read(dir.path().join("build/notes.pdf")).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_execute_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = PdfArgs {
            input: None,
            output: None,
            engine: None,
            config: Some(dir.path().join("absent.toml")),
            verbose: false,
        };
        let err = args.execute().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
