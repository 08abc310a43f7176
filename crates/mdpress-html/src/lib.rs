//! Print-ready HTML rendering for markdown reports.
//!
//! [`render_markdown`] turns markdown into an HTML fragment with heading
//! anchors, a table of contents and the extracted title. [`render_document`]
//! wraps a fragment in a standalone page styled for A4 printing, with a
//! "Print / Save as PDF" button and a Ctrl/Cmd+P shortcut.
//!
//! # Example
//!
//! ```
//! use mdpress_html::{HtmlOptions, render_markdown};
//!
//! let rendered = render_markdown("# Report\n\n## Goals", &HtmlOptions::default());
//! assert_eq!(rendered.title.as_deref(), Some("Report"));
//! assert!(rendered.html.contains(r#"<h2 id="goals">Goals</h2>"#));
//! ```

mod renderer;
mod state;
mod template;

use std::path::{Path, PathBuf};

use renderer::HtmlRenderer;

pub use renderer::RenderedHtml;
pub use mdpress_blocks::escape_html;
pub use state::{TocEntry, slugify};

/// Options for HTML rendering.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Document title. Falls back to the first H1, then the input file stem.
    pub title: Option<String>,
    /// Include the floating print button.
    pub print_button: bool,
    /// Render soft line breaks as `<br>`.
    pub line_breaks: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: None,
            print_button: true,
            line_breaks: true,
        }
    }
}

/// Outcome of [`convert_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlSummary {
    /// Title written to the `<title>` element.
    pub title: String,
    /// Number of table of contents entries.
    pub headings: usize,
    /// Size of the written document in bytes.
    pub bytes: usize,
}

/// HTML conversion error.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Markdown input could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// HTML output could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render markdown to an HTML fragment.
#[must_use]
pub fn render_markdown(markdown: &str, options: &HtmlOptions) -> RenderedHtml {
    HtmlRenderer::new(options.line_breaks).render_markdown(markdown)
}

/// Wrap a rendered fragment in the print-ready page template.
///
/// The title is taken from `options`, then the fragment's first H1, then
/// `fallback_title`.
#[must_use]
pub fn render_document(
    rendered: &RenderedHtml,
    options: &HtmlOptions,
    fallback_title: &str,
) -> String {
    let title = document_title(rendered, options, fallback_title);
    template::render_page(title, &rendered.html, options.print_button)
}

fn document_title<'a>(
    rendered: &'a RenderedHtml,
    options: &'a HtmlOptions,
    fallback_title: &'a str,
) -> &'a str {
    options
        .title
        .as_deref()
        .or(rendered.title.as_deref())
        .unwrap_or(fallback_title)
}

/// Convert a markdown file into a standalone HTML file.
///
/// Missing parent directories of `output` are created.
///
/// # Errors
///
/// Returns [`ConvertError`] if the input cannot be read or the output
/// cannot be written.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &HtmlOptions,
) -> Result<HtmlSummary, ConvertError> {
    let markdown = std::fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let rendered = render_markdown(&markdown, options);
    tracing::debug!(
        headings = rendered.toc.len(),
        title = ?rendered.title,
        "Rendered markdown"
    );

    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let title = document_title(&rendered, options, &stem).to_owned();
    let document = template::render_page(&title, &rendered.html, options.print_button);

    let write_error = |source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(output, &document).map_err(write_error)?;
    tracing::info!(path = %output.display(), bytes = document.len(), "Wrote HTML document");

    Ok(HtmlSummary {
        title,
        headings: rendered.toc.len(),
        bytes: document.len(),
    })
}
