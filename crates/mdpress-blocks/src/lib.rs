//! Line-oriented markdown subset parser producing printable blocks.
//!
//! This crate turns a markdown report into an ordered sequence of [`Block`]s
//! that a paginating document builder can lay out directly.
//!
//! # Front-ends
//!
//! - [`parse`]: a hand-rolled, line-by-line classifier for the markdown subset
//!   used by project reports (headings, rules, lists, pipe tables, fenced code,
//!   paragraphs). It never fails: malformed constructs degrade to whatever the
//!   classification rules produce.
//! - [`blocks_from_markdown`]: a full CommonMark parse via `pulldown-cmark`,
//!   lowered into the same block model.
//!
//! Inline text in every block uses a small markup subset produced by
//! [`clean_inline`]: `<b>…</b>`, `<i>…</i>` and `<code>…</code>`.
//!
//! # Example
//!
//! ```
//! use mdpress_blocks::{Block, parse};
//!
//! let blocks = parse("# Report\n\nSome **bold** text");
//! assert_eq!(blocks[0], Block::Title { text: "Report".to_owned() });
//! assert_eq!(
//!     blocks[2],
//!     Block::Paragraph { text: "Some <b>bold</b> text".to_owned() }
//! );
//! ```

mod block;
mod cmark;
mod inline;
mod parser;
mod table;
mod util;

pub use block::{Block, Bullet, Table};
pub use cmark::blocks_from_markdown;
pub use inline::clean_inline;
pub use parser::{LineParser, parse};
pub use util::{escape_html, heading_level_to_num};
