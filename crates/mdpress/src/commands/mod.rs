//! CLI command implementations.

pub(crate) mod blocks;
pub(crate) mod html;
pub(crate) mod pdf;

pub(crate) use blocks::BlocksArgs;
pub(crate) use html::HtmlArgs;
pub(crate) use pdf::PdfArgs;
