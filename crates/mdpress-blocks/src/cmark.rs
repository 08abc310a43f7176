//! CommonMark front-end.
//!
//! Parses with `pulldown-cmark` and lowers the event stream into the same
//! [`Block`] model the line parser produces, so either front-end can feed the
//! same document builder.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::block::{Block, Bullet, Table};
use crate::util::{escape_html, heading_level_to_num};

/// Parse markdown with a full CommonMark parser and lower it to blocks.
///
/// Tables, strikethrough and task lists are enabled. Heading levels deeper
/// than 3 are clamped to 3. Raw HTML is dropped.
#[must_use]
pub fn blocks_from_markdown(markdown: &str) -> Vec<Block> {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut lowering = Lowering::default();
    for event in Parser::new_ext(markdown, options) {
        lowering.event(event);
    }
    tracing::debug!(blocks = lowering.blocks.len(), "Lowered CommonMark events");
    lowering.blocks
}

/// One open list.
struct ListLevel {
    bullet: Bullet,
    /// Whether the current item already produced its `ListItem` block.
    item_emitted: bool,
}

/// Table rows collected between `Start(Table)` and `End(Table)`.
#[derive(Default)]
struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
}

#[derive(Default)]
struct Lowering {
    blocks: Vec<Block>,
    /// Inline markup of the paragraph, heading, item or cell being built.
    inline: String,
    heading: Option<u8>,
    lists: Vec<ListLevel>,
    code: Option<String>,
    table: Option<TableBuilder>,
    quote_depth: usize,
    /// Nesting of raw HTML blocks, whose text is dropped.
    in_html: bool,
}

impl Lowering {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.inline.push_str("<code>");
                self.inline.push_str(&escape_html(&code));
                self.inline.push_str("</code>");
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(code) = &mut self.code {
                    code.push('\n');
                } else {
                    self.inline.push(' ');
                }
            }
            Event::Rule => self.blocks.push(Block::Rule),
            Event::TaskListMarker(checked) => {
                self.inline.push_str(if checked { "[x] " } else { "[ ] " });
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => self.text(&math),
            Event::FootnoteReference(label) => {
                self.inline.push('[');
                self.inline.push_str(&escape_html(&label));
                self.inline.push(']');
            }
            Event::Html(_) | Event::InlineHtml(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.inline.clear();
                }
            }
            Tag::Heading { level, .. } => {
                self.flush_item();
                self.inline.clear();
                self.heading = Some(heading_level_to_num(level));
            }
            Tag::CodeBlock(_) => {
                self.flush_item();
                self.code = Some(String::new());
            }
            Tag::List(start) => {
                // Text before a nested list, code block, table or heading
                // belongs to the parent item.
                self.flush_item();
                self.lists.push(ListLevel {
                    bullet: if start.is_some() {
                        Bullet::Numbered
                    } else {
                        Bullet::Bulleted
                    },
                    item_emitted: false,
                });
            }
            Tag::Item => {
                self.inline.clear();
                if let Some(level) = self.lists.last_mut() {
                    level.item_emitted = false;
                }
            }
            Tag::Table(_) => {
                self.flush_item();
                self.table = Some(TableBuilder::default());
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = &mut self.table {
                    table.row.clear();
                }
            }
            Tag::TableCell => self.inline.clear(),
            Tag::BlockQuote(_) => self.quote_depth += 1,
            Tag::HtmlBlock => self.in_html = true,
            Tag::Emphasis => self.inline.push_str("<i>"),
            Tag::Strong => self.inline.push_str("<b>"),
            Tag::Strikethrough
            | Tag::Link { .. }
            | Tag::Image { .. }
            | Tag::Superscript
            | Tag::Subscript
            | Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.flush_paragraph();
                } else {
                    self.flush_item();
                }
            }
            TagEnd::Heading(_) => {
                let text = self.take_inline();
                let level = self.heading.take().unwrap_or(1);
                if level == 1 && self.blocks.is_empty() {
                    self.blocks.push(Block::Title { text });
                } else {
                    self.blocks.push(Block::Heading {
                        level: level.min(3),
                        text,
                    });
                }
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    self.blocks.push(Block::CodeBlock {
                        text: code.trim_end_matches('\n').to_owned(),
                    });
                }
            }
            TagEnd::Item => self.flush_item(),
            TagEnd::List(_) => {
                self.flush_item();
                self.lists.pop();
            }
            TagEnd::TableCell => {
                let cell = self.take_inline();
                if let Some(table) = &mut self.table {
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = &mut self.table {
                    table.header = std::mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = &mut self.table {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(Block::Table(Table {
                        header: table.header,
                        rows: table.rows,
                    }));
                }
            }
            TagEnd::BlockQuote(_) => self.quote_depth = self.quote_depth.saturating_sub(1),
            TagEnd::HtmlBlock => self.in_html = false,
            TagEnd::Emphasis => self.inline.push_str("</i>"),
            TagEnd::Strong => self.inline.push_str("</b>"),
            TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image
            | TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::FootnoteDefinition
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = &mut self.code {
            code.push_str(text);
        } else if !self.in_html {
            self.inline.push_str(&escape_html(text));
        }
    }

    fn take_inline(&mut self) -> String {
        let text = self.inline.trim().to_owned();
        self.inline.clear();
        text
    }

    fn flush_paragraph(&mut self) {
        let text = self.take_inline();
        if text.is_empty() {
            return;
        }
        let text = if self.quote_depth > 0 {
            format!("<i>{text}</i>")
        } else {
            text
        };
        self.blocks.push(Block::Paragraph { text });
    }

    /// Emit pending item text: the first chunk of an item is its `ListItem`,
    /// later chunks (loose list paragraphs) become plain paragraphs.
    fn flush_item(&mut self) {
        let depth = self.lists.len();
        let Some(level) = self.lists.last_mut() else {
            return;
        };
        let text = self.inline.trim().to_owned();
        self.inline.clear();
        if text.is_empty() {
            return;
        }
        if level.item_emitted {
            self.blocks.push(Block::Paragraph { text });
        } else {
            level.item_emitted = true;
            self.blocks.push(Block::ListItem {
                bullet: level.bullet,
                indent: (depth - 1) * 2,
                text,
            });
        }
    }
}
