//! `mdpress blocks` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mdpress_blocks::Block;
use mdpress_config::{CliSettings, Config, PdfEngine};

use crate::error::CliError;

/// Arguments for the blocks command.
#[derive(Args)]
pub(crate) struct BlocksArgs {
    /// Markdown report to parse (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Markdown front-end: `lines` or `cmark` (overrides config).
    #[arg(short, long)]
    engine: Option<PdfEngine>,

    /// Path to configuration file (default: auto-discover mdpress.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BlocksArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            input: self.input,
            engine: self.engine,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = std::fs::read_to_string(&config.input_path)?;
        let blocks = mdpress_pdf::parse_blocks(&markdown, config.pdf_resolved.engine);

        let mut stdout = std::io::stdout().lock();
        write_json(&mut stdout, &blocks)?;
        Ok(())
    }
}

fn write_json(writer: &mut impl Write, blocks: &[Block]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *writer, blocks)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_json() {
        let blocks = mdpress_pdf::parse_blocks("# Report\n---", PdfEngine::Lines);
        let mut buffer = Vec::new();
        write_json(&mut buffer, &blocks).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), blocks.len());
        assert!(buffer.ends_with(b"\n"));
    }
}
