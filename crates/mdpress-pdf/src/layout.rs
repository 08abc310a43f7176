//! Flowing blocks onto fixed-size pages.
//!
//! Layout works top-down: the cursor is the distance from the top edge of
//! the page. Draw commands are emitted in PDF user space (origin bottom-left).

use mdpress_blocks::{Block, Bullet, Table};

use crate::encoding::{BULLET, to_win_ansi};
use crate::markup::{Run, parse_runs};
use crate::metrics::{char_width, text_width};
use crate::style::{self, Color, Font, TextStyle, cm};

/// Tolerance for floating point comparisons against the frame.
const EPSILON: f32 = 0.01;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Margin on all four sides.
    pub margin: f32,
}

impl PageGeometry {
    /// ISO A4 (595.28 × 841.89 pt).
    #[must_use]
    pub fn a4(margin_cm: f32) -> Self {
        Self::from_cm(21.0, 29.7, margin_cm)
    }

    /// US Letter (612 × 792 pt).
    #[must_use]
    pub fn letter(margin_cm: f32) -> Self {
        Self::from_cm(21.59, 27.94, margin_cm)
    }

    #[must_use]
    pub fn from_cm(width_cm: f32, height_cm: f32, margin_cm: f32) -> Self {
        Self {
            width: cm(width_cm),
            height: cm(height_cm),
            margin: cm(margin_cm),
        }
    }

    /// Width available to content.
    #[must_use]
    pub fn frame_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest cursor position content may reach.
    fn frame_bottom(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4(2.0)
    }
}

/// A primitive drawing command in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Draw {
    /// Text at a baseline position.
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        text: Vec<u8>,
    },
    /// Rectangle with lower-left corner at (x, y).
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<(f32, Color)>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
    },
    /// Outlined circle.
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        width: f32,
        color: Color,
    },
}

/// Draw commands of one page.
#[derive(Debug, Default, Clone)]
pub(crate) struct Page {
    pub(crate) items: Vec<Draw>,
}

/// Encoded text in a single font.
#[derive(Debug, Clone)]
struct Fragment {
    text: Vec<u8>,
    font: Font,
    width: f32,
}

/// Text between spaces; may span several styled runs.
#[derive(Debug, Clone, Default)]
struct Word {
    fragments: Vec<Fragment>,
    width: f32,
}

impl Word {
    fn push(&mut self, font: Font, text: &[u8], size: f32) {
        if text.is_empty() {
            return;
        }
        let width = text_width(font, text, size);
        self.width += width;
        match self.fragments.last_mut() {
            Some(last) if last.font == font => {
                last.text.extend_from_slice(text);
                last.width += width;
            }
            _ => self.fragments.push(Fragment {
                text: text.to_vec(),
                font,
                width,
            }),
        }
    }

    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Break a word wider than `max_width` into pieces that fit.
    fn split_to_fit(self, max_width: f32, size: f32) -> Vec<Self> {
        let mut pieces = Vec::new();
        let mut piece = Self::default();
        for fragment in self.fragments {
            for &byte in &fragment.text {
                let width = f32::from(char_width(fragment.font, byte)) * size / 1000.0;
                if !piece.is_empty() && piece.width + width > max_width + EPSILON {
                    pieces.push(std::mem::take(&mut piece));
                }
                piece.push(fragment.font, &[byte], size);
            }
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

/// One wrapped line of words.
#[derive(Debug, Default)]
struct Line {
    words: Vec<Word>,
    width: f32,
}

/// Font for a styled run in a paragraph whose base weight is `bold`.
fn run_font(run: &Run, bold: bool) -> Font {
    if run.code {
        Font::Courier
    } else {
        Font::helvetica(bold || run.bold, run.italic)
    }
}

/// Split runs into words at spaces.
fn words_from_runs(runs: &[Run], bold: bool, size: f32) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = Word::default();

    for run in runs {
        let font = run_font(run, bold);
        let bytes = to_win_ansi(&run.text);
        for (index, piece) in bytes.split(|&b| b == b' ' || b == b'\n').enumerate() {
            if index > 0 && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(font, piece, size);
        }
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Greedy line filling. Words wider than a line are broken by character.
fn wrap(words: Vec<Word>, max_width: f32, space_width: f32, size: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();

    for word in words {
        let pieces = if word.width > max_width {
            word.split_to_fit(max_width, size)
        } else {
            vec![word]
        };

        for piece in pieces {
            if line.words.is_empty() {
                line.width = piece.width;
            } else if line.width + space_width + piece.width > max_width + EPSILON {
                lines.push(std::mem::take(&mut line));
                line.width = piece.width;
            } else {
                line.width += space_width + piece.width;
            }
            line.words.push(piece);
        }
    }

    if !line.words.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap marked-up text to a width.
fn wrap_markup(markup: &str, bold: bool, size: f32, max_width: f32) -> Vec<Line> {
    let words = words_from_runs(&parse_runs(markup), bold, size);
    wrap(words, max_width, space_width(size), size)
}

fn space_width(size: f32) -> f32 {
    text_width(Font::Helvetica, b" ", size)
}

/// Baseline offset from the top of a line box.
fn baseline_offset(leading: f32, size: f32) -> f32 {
    (leading - size) / 2.0 + size * 0.8
}

/// Paginating layout engine.
pub(crate) struct Layouter<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<Page>,
    page: Page,
    /// Distance of the cursor from the top edge of the page.
    cursor: f32,
    /// Nothing has been placed on the current page yet.
    at_top: bool,
}

impl<'g> Layouter<'g> {
    pub(crate) fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            page: Page::default(),
            cursor: geometry.margin,
            at_top: true,
        }
    }

    /// Lay out all blocks and return the finished pages.
    pub(crate) fn layout(mut self, blocks: &[Block]) -> Vec<Page> {
        for block in blocks {
            self.block(block);
        }
        self.finish()
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.page.items.is_empty() || self.pages.is_empty() {
            self.pages.push(self.page);
        }
        self.pages
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Title { text } => self.paragraph(text, &style::TITLE, 0.0, None),
            Block::Heading { level, text } => {
                self.paragraph(text, style::heading_style(*level), 0.0, None);
            }
            Block::Paragraph { text } => self.paragraph(text, &style::BODY, 0.0, None),
            Block::ListItem {
                bullet,
                indent,
                text,
            } => {
                let indent = list_indent(*indent, style::BODY.font_size);
                self.paragraph(text, &style::BODY, indent, Some(*bullet));
            }
            Block::Rule => self.rule(),
            Block::Table(table) => self.table(table),
            Block::CodeBlock { text } => self.code_block(text),
            Block::Spacer => self.skip(style::SPACER),
        }
    }

    fn left(&self) -> f32 {
        self.geometry.margin
    }

    /// Convert a distance from the page top into a PDF y coordinate.
    fn pdf_y(&self, from_top: f32) -> f32 {
        self.geometry.height - from_top
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.page);
        self.pages.push(page);
        self.cursor = self.geometry.margin;
        self.at_top = true;
    }

    /// Start a new page unless `height` fits below the cursor.
    fn ensure(&mut self, height: f32) {
        if !self.at_top && self.cursor + height > self.geometry.frame_bottom() + EPSILON {
            self.new_page();
        }
    }

    /// Reserve `height` at the cursor and return its top.
    fn place(&mut self, height: f32) -> f32 {
        self.ensure(height);
        let top = self.cursor;
        self.cursor += height;
        self.at_top = false;
        top
    }

    /// Vertical space that is dropped at the top of a page.
    fn space_before(&mut self, amount: f32) {
        if !self.at_top {
            self.cursor += amount;
        }
    }

    /// Spacer block: skipped at the top of a page, ends the page on overflow.
    fn skip(&mut self, amount: f32) {
        if self.at_top {
            return;
        }
        self.cursor += amount;
        if self.cursor >= self.geometry.frame_bottom() {
            self.new_page();
        }
    }

    fn push(&mut self, draw: Draw) {
        self.page.items.push(draw);
    }

    #[allow(clippy::too_many_arguments)]
    fn text(&mut self, x: f32, baseline: f32, font: Font, size: f32, color: Color, text: Vec<u8>) {
        let y = self.pdf_y(baseline);
        self.push(Draw::Text {
            x,
            y,
            font,
            size,
            color,
            text,
        });
    }

    fn paragraph(&mut self, markup: &str, style: &TextStyle, indent: f32, bullet: Option<Bullet>) {
        self.space_before(style.space_before);

        let size = style.font_size;
        let marker_width = if bullet.is_some() {
            text_width(Font::Helvetica, &[BULLET], size) + space_width(size)
        } else {
            0.0
        };
        let text_left = self.left() + indent + marker_width;
        let max_width = self.geometry.frame_width() - indent - marker_width;

        let mut lines = wrap_markup(markup, style.bold, size, max_width);
        if lines.is_empty() {
            lines.push(Line::default());
        }

        for (index, line) in lines.into_iter().enumerate() {
            let top = self.place(style.leading);
            let baseline = top + baseline_offset(style.leading, size);

            if index == 0
                && let Some(bullet) = bullet
            {
                self.bullet(bullet, self.left() + indent, baseline, size, style.color);
            }

            let mut x = if style.centered {
                self.left() + (self.geometry.frame_width() - line.width) / 2.0
            } else {
                text_left
            };
            for (word_index, word) in line.words.into_iter().enumerate() {
                if word_index > 0 {
                    x += space_width(size);
                }
                for fragment in word.fragments {
                    self.text(x, baseline, fragment.font, size, style.color, fragment.text);
                    x += fragment.width;
                }
            }
        }

        if let Some((width, color)) = style.underline {
            let top = self.place(style::UNDERLINE_GAP + width);
            let y = self.pdf_y(top + style::UNDERLINE_GAP + width / 2.0);
            let left = self.left();
            self.push(Draw::Line {
                from: (left, y),
                to: (left + self.geometry.frame_width(), y),
                width,
                color,
            });
        }

        self.cursor += style.space_after;
    }

    fn bullet(&mut self, bullet: Bullet, x: f32, baseline: f32, size: f32, color: Color) {
        match bullet {
            Bullet::Bulleted => {
                self.text(x, baseline, Font::Helvetica, size, color, vec![BULLET]);
            }
            Bullet::Numbered => {
                let glyph_width = text_width(Font::Helvetica, &[BULLET], size);
                let y = self.pdf_y(baseline) + size * 0.3;
                self.push(Draw::Circle {
                    cx: x + glyph_width / 2.0,
                    cy: y,
                    radius: size * 0.2,
                    width: 0.6,
                    color,
                });
            }
        }
    }

    fn rule(&mut self) {
        self.space_before(style::BLOCK_GAP);
        let top = self.place(style::RULE_WIDTH);
        let y = self.pdf_y(top + style::RULE_WIDTH / 2.0);
        let left = self.left();
        self.push(Draw::Line {
            from: (left, y),
            to: (left + self.geometry.frame_width(), y),
            width: style::RULE_WIDTH,
            color: style::RULE_COLOR,
        });
        self.cursor += style::BLOCK_GAP;
    }

    /// Code lines never wrap; the box is split by line across pages.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn code_block(&mut self, text: &str) {
        let lines: Vec<Vec<u8>> = text.split('\n').map(to_win_ansi).collect();
        let padding = style::CODE_PADDING;
        let leading = style::CODE_LEADING;
        let mut rest = lines.as_slice();

        while !rest.is_empty() {
            let room = (self.geometry.frame_bottom() - self.cursor - 2.0 * padding) / leading;
            if room + EPSILON < 1.0 && !self.at_top {
                self.new_page();
                continue;
            }
            let count = (room.max(1.0).floor() as usize).min(rest.len());
            let (chunk, remaining) = rest.split_at(count);
            self.code_chunk(chunk);
            rest = remaining;
            if !rest.is_empty() {
                self.new_page();
            }
        }

        self.cursor += style::BLOCK_GAP;
    }

    #[allow(clippy::cast_precision_loss)]
    fn code_chunk(&mut self, lines: &[Vec<u8>]) {
        let padding = style::CODE_PADDING;
        let leading = style::CODE_LEADING;
        let height = lines.len() as f32 * leading + 2.0 * padding;
        let top = self.place(height);
        let left = self.left();

        self.push(Draw::Rect {
            x: left,
            y: self.pdf_y(top + height),
            width: self.geometry.frame_width(),
            height,
            fill: Some(style::CODE_BACKGROUND),
            stroke: Some((style::CODE_BORDER, style::GRID)),
        });

        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = top
                + padding
                + index as f32 * leading
                + baseline_offset(leading, style::CODE_FONT_SIZE);
            self.text(
                left + padding,
                baseline,
                Font::Courier,
                style::CODE_FONT_SIZE,
                style::BLACK,
                line.clone(),
            );
        }
    }

    /// Rows never split across pages; short rows are padded.
    #[allow(clippy::cast_precision_loss)]
    fn table(&mut self, table: &Table) {
        let columns = table.column_count();
        if columns == 0 {
            return;
        }

        let size = style::TABLE_FONT_SIZE;
        let leading = style::TABLE_LEADING;
        let widths = column_widths(table, columns, self.geometry.frame_width());
        let table_width: f32 = widths.iter().sum();
        let table_left = self.left() + (self.geometry.frame_width() - table_width) / 2.0;
        let empty = String::new();

        for (row_index, row) in table.all_rows().enumerate() {
            let header = row_index == 0;
            let bottom_padding = if header {
                style::HEADER_PADDING_BOTTOM
            } else {
                style::CELL_PADDING_BOTTOM
            };

            let cells: Vec<Vec<Line>> = (0..columns)
                .map(|column| {
                    let text = row.get(column).unwrap_or(&empty);
                    let max_width = widths[column] - 2.0 * style::CELL_PADDING_X;
                    wrap_markup(text, header, size, max_width.max(1.0))
                })
                .collect();
            let line_count = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
            let height =
                line_count as f32 * leading + style::CELL_PADDING_TOP + bottom_padding;

            let top = self.place(height);
            let y = self.pdf_y(top + height);

            let background = if header {
                Some(style::ACCENT)
            } else if row_index % 2 == 0 {
                Some(style::ZEBRA)
            } else {
                None
            };
            if background.is_some() {
                self.push(Draw::Rect {
                    x: table_left,
                    y,
                    width: table_width,
                    height,
                    fill: background,
                    stroke: None,
                });
            }

            let color = if header { style::WHITE } else { style::BLACK };
            let mut x = table_left;
            for (column, lines) in cells.into_iter().enumerate() {
                self.push(Draw::Rect {
                    x,
                    y,
                    width: widths[column],
                    height,
                    fill: None,
                    stroke: Some((style::GRID_WIDTH, style::GRID)),
                });
                for (line_index, line) in lines.into_iter().enumerate() {
                    let baseline = top
                        + style::CELL_PADDING_TOP
                        + line_index as f32 * leading
                        + baseline_offset(leading, size);
                    let mut text_x = x + style::CELL_PADDING_X;
                    for (word_index, word) in line.words.into_iter().enumerate() {
                        if word_index > 0 {
                            text_x += space_width(size);
                        }
                        for fragment in word.fragments {
                            self.text(text_x, baseline, fragment.font, size, color, fragment.text);
                            text_x += fragment.width;
                        }
                    }
                }
                x += widths[column];
            }
        }

        self.cursor += style::BLOCK_GAP;
    }
}

/// Indent of a list item: two non-breaking-space widths per indent unit.
#[allow(clippy::cast_precision_loss)]
fn list_indent(indent: usize, size: f32) -> f32 {
    let nbsp = f32::from(char_width(Font::Helvetica, 0xa0)) * size / 1000.0;
    indent as f32 * 2.0 * nbsp
}

/// Natural column widths (widest single-line cell plus padding), scaled
/// down proportionally when the table is wider than the frame.
fn column_widths(table: &Table, columns: usize, frame_width: f32) -> Vec<f32> {
    let size = style::TABLE_FONT_SIZE;
    let mut widths = vec![0.0_f32; columns];

    for (row_index, row) in table.all_rows().enumerate() {
        for (column, cell) in row.iter().enumerate().take(columns) {
            let lines = wrap_markup(cell, row_index == 0, size, f32::INFINITY);
            let natural = lines.first().map_or(0.0, |line| line.width);
            widths[column] = widths[column].max(natural);
        }
    }

    for width in &mut widths {
        *width += 2.0 * style::CELL_PADDING_X;
    }

    let total: f32 = widths.iter().sum();
    if total > frame_width {
        let scale = frame_width / total;
        for width in &mut widths {
            *width *= scale;
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(page: &Page) -> Vec<String> {
        page.items
            .iter()
            .filter_map(|draw| match draw {
                Draw::Text { text, .. } => Some(String::from_utf8_lossy(text).into_owned()),
                _ => None,
            })
            .collect()
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_wrap_fits_width() {
        let words = words_from_runs(&parse_runs("aaa bbb ccc"), false, 10.0);
        let word_width = text_width(Font::Helvetica, b"aaa", 10.0);
        let lines = wrap(words, word_width * 2.0 + space_width(10.0), space_width(10.0), 10.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].words.len(), 2);
        assert_eq!(lines[1].words.len(), 1);
    }

    #[test]
    fn test_long_word_is_broken() {
        let words = words_from_runs(&parse_runs("abcdefghij"), false, 10.0);
        let lines = wrap(words, 20.0, space_width(10.0), 10.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.width <= 20.0 + EPSILON));
    }

    #[test]
    fn test_word_spanning_runs() {
        let words = words_from_runs(&parse_runs("<b>bold</b>tail next"), false, 10.0);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].fragments.len(), 2);
        assert_eq!(words[0].fragments[0].font, Font::HelveticaBold);
        assert_eq!(words[0].fragments[1].font, Font::Helvetica);
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let geometry = PageGeometry::default();
        let pages = Layouter::new(&geometry).layout(&[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].items.is_empty());
    }

    #[test]
    fn test_paragraph_text_and_inline_styles() {
        let geometry = PageGeometry::default();
        let pages = Layouter::new(&geometry).layout(&[paragraph("Plug <b>status</b> <code>ON</code>")]);
        assert_eq!(texts(&pages[0]), ["Plug", "status", "ON"]);
        let fonts: Vec<Font> = pages[0]
            .items
            .iter()
            .filter_map(|draw| match draw {
                Draw::Text { font, .. } => Some(*font),
                _ => None,
            })
            .collect();
        assert_eq!(fonts, [Font::Helvetica, Font::HelveticaBold, Font::Courier]);
    }

    #[test]
    fn test_first_line_at_top_margin() {
        let geometry = PageGeometry::default();
        let pages = Layouter::new(&geometry).layout(&[
            Block::Spacer,
            Block::Heading {
                level: 2,
                text: "Top".to_owned(),
            },
        ]);
        let Some(Draw::Text { y, .. }) = pages[0].items.first() else {
            panic!("expected text");
        };
        // Spacer and space-before are both dropped at the top of the page.
        let expected = geometry.height
            - geometry.margin
            - baseline_offset(style::HEADING_2.leading, style::HEADING_2.font_size);
        assert!((y - expected).abs() < 0.01);
    }

    #[test]
    fn test_title_is_centered() {
        let geometry = PageGeometry::default();
        let pages = Layouter::new(&geometry).layout(&[Block::Title {
            text: "Report".to_owned(),
        }]);
        let Some(Draw::Text { x, font, .. }) = pages[0].items.first() else {
            panic!("expected text");
        };
        let width = text_width(Font::HelveticaBold, b"Report", 24.0);
        assert_eq!(*font, Font::HelveticaBold);
        assert!((x - (geometry.margin + (geometry.frame_width() - width) / 2.0)).abs() < 0.01);
    }

    #[test]
    fn test_long_paragraph_spills_to_next_page() {
        let geometry = PageGeometry::default();
        let text = "lorem ipsum dolor sit amet ".repeat(600);
        let pages = Layouter::new(&geometry).layout(&[paragraph(&text)]);
        assert!(pages.len() >= 2);
        for page in &pages {
            for draw in &page.items {
                if let Draw::Text { y, .. } = draw {
                    assert!(*y >= geometry.margin - 0.01);
                    assert!(*y <= geometry.height - geometry.margin);
                }
            }
        }
    }

    #[test]
    fn test_list_item_markers() {
        let geometry = PageGeometry::default();
        let pages = Layouter::new(&geometry).layout(&[
            Block::ListItem {
                bullet: Bullet::Bulleted,
                indent: 0,
                text: "one".to_owned(),
            },
            Block::ListItem {
                bullet: Bullet::Numbered,
                indent: 2,
                text: "two".to_owned(),
            },
        ]);
        let items = &pages[0].items;
        assert!(matches!(&items[0], Draw::Text { text, .. } if text == &[BULLET]));
        assert!(matches!(&items[2], Draw::Circle { .. }));

        let (Draw::Text { x: bullet_x, .. }, Draw::Circle { cx, .. }) = (&items[0], &items[2])
        else {
            panic!("unexpected draw order");
        };
        assert!(*cx > *bullet_x + list_indent(2, 10.0));
    }

    #[test]
    fn test_code_block_splits_across_pages() {
        let geometry = PageGeometry::default();
        let code = (0..200).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let pages = Layouter::new(&geometry).layout(&[Block::CodeBlock { text: code }]);
        assert!(pages.len() >= 2);

        let lines: usize = pages.iter().map(|page| texts(page).len()).sum();
        assert_eq!(lines, 200);
        assert_eq!(texts(&pages[0])[0], "line 0");
        for page in &pages {
            assert!(matches!(page.items[0], Draw::Rect { fill: Some(_), .. }));
        }
    }

    #[test]
    fn test_code_block_keeps_spaces() {
        let geometry = PageGeometry::default();
        let pages = Layouter::new(&geometry).layout(&[Block::CodeBlock {
            text: "  indented  text".to_owned(),
        }]);
        assert_eq!(texts(&pages[0]), ["  indented  text"]);
    }

    #[test]
    fn test_table_pads_short_rows() {
        let geometry = PageGeometry::default();
        let table = Table {
            header: vec!["Part".to_owned(), "Qty".to_owned()],
            rows: vec![vec!["Relay".to_owned()]],
        };
        let pages = Layouter::new(&geometry).layout(&[Block::Table(table)]);
        assert_eq!(texts(&pages[0]), ["Part", "Qty", "Relay"]);

        let grid_cells = pages[0]
            .items
            .iter()
            .filter(|draw| matches!(draw, Draw::Rect { fill: None, stroke: Some(_), .. }))
            .count();
        assert_eq!(grid_cells, 4);
    }

    #[test]
    fn test_table_header_is_bold_white() {
        let geometry = PageGeometry::default();
        let table = Table {
            header: vec!["Part".to_owned()],
            rows: vec![vec!["Relay".to_owned()]],
        };
        let pages = Layouter::new(&geometry).layout(&[Block::Table(table)]);
        let headers: Vec<(Font, Color)> = pages[0]
            .items
            .iter()
            .filter_map(|draw| match draw {
                Draw::Text { font, color, .. } => Some((*font, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(
            headers,
            [(Font::HelveticaBold, style::WHITE), (Font::Helvetica, style::BLACK)]
        );
    }

    #[test]
    fn test_wide_table_is_scaled_to_frame() {
        let long = "word ".repeat(80);
        let table = Table {
            header: vec![long.clone(), long],
            rows: Vec::new(),
        };
        let widths = column_widths(&table, 2, 400.0);
        let total: f32 = widths.iter().sum();
        assert!((total - 400.0).abs() < 0.01);
        assert!((widths[0] - widths[1]).abs() < 0.01);
    }

    #[test]
    fn test_table_rows_are_not_split() {
        let geometry = PageGeometry::default();
        let mut blocks: Vec<Block> = (0..60).map(|_| paragraph("filler")).collect();
        blocks.push(Block::Table(Table {
            header: vec!["H".to_owned()],
            rows: (0..40).map(|i| vec![format!("row {i}")]).collect(),
        }));
        let pages = Layouter::new(&geometry).layout(&blocks);
        assert!(pages.len() >= 2);
        for page in &pages {
            for draw in &page.items {
                if let Draw::Rect { y, .. } = draw {
                    assert!(*y >= geometry.margin - 0.01);
                }
            }
        }
    }

    #[test]
    fn test_rule_and_heading_underline() {
        let geometry = PageGeometry::default();
        let pages = Layouter::new(&geometry).layout(&[
            Block::Heading {
                level: 1,
                text: "Design".to_owned(),
            },
            Block::Rule,
        ]);
        let lines: Vec<(f32, Color)> = pages[0]
            .items
            .iter()
            .filter_map(|draw| match draw {
                Draw::Line { width, color, .. } => Some((*width, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(
            lines,
            [(2.0, style::ACCENT), (style::RULE_WIDTH, style::RULE_COLOR)]
        );
    }

    #[test]
    fn test_trailing_spacers_do_not_add_pages() {
        let geometry = PageGeometry::default();
        let mut blocks = vec![paragraph("text")];
        blocks.extend(std::iter::repeat_n(Block::Spacer, 200));
        let pages = Layouter::new(&geometry).layout(&blocks);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_letter_geometry() {
        let geometry = PageGeometry::letter(2.0);
        assert!((geometry.width - 612.0).abs() < 0.01);
        assert!((geometry.height - 792.0).abs() < 0.01);
        let a4 = PageGeometry::a4(2.0);
        assert!((a4.width - 595.28).abs() < 0.01);
        assert!((a4.height - 841.89).abs() < 0.01);
    }
}
