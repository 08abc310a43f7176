//! CLI error types.

use mdpress_config::ConfigError;
use mdpress_html::ConvertError;
use mdpress_pdf::PdfError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Html(#[from] ConvertError),

    #[error("{0}")]
    Pdf(#[from] PdfError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
