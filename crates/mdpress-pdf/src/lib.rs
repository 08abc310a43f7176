//! Paginated PDF output for markdown reports.
//!
//! Blocks produced by [`mdpress_blocks`] are flowed onto fixed-size pages
//! using the report styles (centred title, coloured headings, boxed code,
//! zebra-striped tables) and written as a PDF with the standard Type1 fonts.
//!
//! # Example
//!
//! ```
//! use mdpress_pdf::{PdfOptions, render_blocks};
//!
//! let blocks = mdpress_blocks::parse("# Report\n\nHello");
//! let pdf = render_blocks(&blocks, &PdfOptions::default()).unwrap();
//! assert!(pdf.starts_with(b"%PDF-1.7"));
//! ```

mod encoding;
mod layout;
mod markup;
mod metrics;
mod style;
mod writer;

use std::path::{Path, PathBuf};

use mdpress_blocks::Block;
use mdpress_config::{PageSize, PdfConfig, PdfEngine};

pub use layout::PageGeometry;

/// Options for PDF rendering.
#[derive(Debug, Clone, Default)]
pub struct PdfOptions {
    /// Page size and margins.
    pub geometry: PageGeometry,
    /// Markdown front-end used by [`convert_file`].
    pub engine: PdfEngine,
    /// Document title. Falls back to the text of the first title block.
    pub title: Option<String>,
}

impl From<&PdfConfig> for PdfOptions {
    fn from(config: &PdfConfig) -> Self {
        let geometry = match config.page_size {
            PageSize::A4 => PageGeometry::a4(config.margin_cm),
            PageSize::Letter => PageGeometry::letter(config.margin_cm),
        };
        Self {
            geometry,
            engine: config.engine,
            title: None,
        }
    }
}

/// Outcome of [`convert_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfSummary {
    /// Number of pages written.
    pub pages: usize,
    /// Number of blocks laid out.
    pub blocks: usize,
}

/// PDF rendering error.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Markdown input could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// PDF output could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// PDF object serialisation failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    /// I/O error while serialising.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse markdown into blocks with the given front-end.
#[must_use]
pub fn parse_blocks(markdown: &str, engine: PdfEngine) -> Vec<Block> {
    match engine {
        PdfEngine::Lines => mdpress_blocks::parse(markdown),
        PdfEngine::Cmark => mdpress_blocks::blocks_from_markdown(markdown),
    }
}

/// Lay out blocks and serialise the PDF document.
///
/// # Errors
///
/// Returns [`PdfError`] if the document cannot be serialised.
pub fn render_blocks(blocks: &[Block], options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
    render(blocks, options).map(|(bytes, _)| bytes)
}

/// Render and report the page count.
fn render(blocks: &[Block], options: &PdfOptions) -> Result<(Vec<u8>, usize), PdfError> {
    let pages = layout::Layouter::new(&options.geometry).layout(blocks);
    tracing::debug!(blocks = blocks.len(), pages = pages.len(), "Laid out document");

    let title = options.title.clone().or_else(|| document_title(blocks));
    let bytes = writer::write_document(&pages, &options.geometry, title.as_deref())?;
    Ok((bytes, pages.len()))
}

/// Plain text of the first title block.
fn document_title(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Title { text } => Some(markup::plain_text(text)),
        _ => None,
    })
}

/// Convert a markdown file into a PDF file.
///
/// Missing parent directories of `output` are created.
///
/// # Errors
///
/// Returns [`PdfError`] if the input cannot be read, the document cannot be
/// serialised, or the output cannot be written.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &PdfOptions,
) -> Result<PdfSummary, PdfError> {
    let markdown = std::fs::read_to_string(input).map_err(|source| PdfError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let blocks = parse_blocks(&markdown, options.engine);
    tracing::debug!(engine = %options.engine, blocks = blocks.len(), "Parsed markdown");

    let (bytes, pages) = render(&blocks, options)?;

    let write_error = |source| PdfError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(output, &bytes).map_err(write_error)?;
    tracing::info!(path = %output.display(), pages, bytes = bytes.len(), "Wrote PDF document");

    Ok(PdfSummary {
        pages,
        blocks: blocks.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Document;
    use pretty_assertions::assert_eq;

    const REPORT: &str = "\
# Smart Plug Report

## Overview

The **plug** reports power over `MQTT`.

- Relay control
  - Scheduling
1. Measure
2. Publish

| Part | Qty |
|------|-----|
| ESP32 | 1 |

```
void loop() {}
```

---
";

    #[test]
    fn test_render_blocks_produces_pdf() {
        let blocks = parse_blocks(REPORT, PdfEngine::Lines);
        let bytes = render_blocks(&blocks, &PdfOptions::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_title_defaults_to_first_title_block() {
        let blocks = parse_blocks("# <b>Smart</b> Plug\n\ntext", PdfEngine::Lines);
        assert_eq!(document_title(&blocks).as_deref(), Some("Smart Plug"));
        assert_eq!(document_title(&parse_blocks("text", PdfEngine::Lines)), None);
    }

    #[test]
    fn test_engines_share_block_model() {
        let lines = parse_blocks("# Title\n\n## Section", PdfEngine::Lines);
        let cmark = parse_blocks("# Title\n\n## Section", PdfEngine::Cmark);
        assert_eq!(lines.first(), cmark.first());
        assert!(cmark.contains(&Block::Heading {
            level: 2,
            text: "Section".to_owned()
        }));
    }

    #[test]
    fn test_options_from_config() {
        let config = PdfConfig {
            output: PathBuf::from("out.pdf"),
            engine: PdfEngine::Cmark,
            page_size: PageSize::Letter,
            margin_cm: 1.0,
        };
        let options = PdfOptions::from(&config);
        assert_eq!(options.engine, PdfEngine::Cmark);
        assert_eq!(options.geometry, PageGeometry::letter(1.0));
    }

    #[test]
    fn test_convert_file_multi_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.md");
        let output = dir.path().join("build/report.pdf");
        let paragraph = "A long paragraph about relay timing and power measurement. ".repeat(40);
        let markdown = format!("# Report\n\n{}", [paragraph.as_str(); 8].join("\n\n"));
        std::fs::write(&input, markdown).unwrap();

        let summary = convert_file(&input, &output, &PdfOptions::default()).unwrap();

        assert!(summary.pages >= 2);
        let doc = Document::load(&output).unwrap();
        assert_eq!(doc.get_pages().len(), summary.pages);
    }

    #[test]
    fn test_convert_file_with_cmark_engine() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.md");
        let output = dir.path().join("report.pdf");
        std::fs::write(&input, REPORT).unwrap();

        let options = PdfOptions {
            engine: PdfEngine::Cmark,
            ..PdfOptions::default()
        };
        let summary = convert_file(&input, &output, &options).unwrap();
        assert_eq!(summary.pages, 1);
        assert!(summary.blocks > 5);
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(
            &dir.path().join("missing.md"),
            &dir.path().join("out.pdf"),
            &PdfOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PdfError::Read { .. }));
    }
}
