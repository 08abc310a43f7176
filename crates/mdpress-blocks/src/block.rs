//! Block model shared by both front-ends and the document builders.

/// Marker drawn in front of a list item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bullet {
    /// `- item` or `* item`.
    Bulleted,
    /// `1. item`.
    Numbered,
}

impl Bullet {
    /// Glyph used when rendering this bullet.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Bulleted => '•',
            Self::Numbered => '○',
        }
    }
}

/// A table with one header row and zero or more data rows.
///
/// Rows are not required to have the same number of cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table {
    /// First row of the table.
    pub header: Vec<String>,
    /// Remaining rows, in source order.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Total number of rows including the header.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Widest row, in cells.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// Iterate over all rows, header first.
    pub fn all_rows(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

/// One structural unit of a printable document.
///
/// Text fields carry inline markup produced by [`clean_inline`](crate::clean_inline),
/// except [`Block::CodeBlock`] which holds raw source text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Block {
    /// Document title (a level-1 heading on the first line).
    Title { text: String },
    /// Section heading, level 1 to 3.
    Heading { level: u8, text: String },
    /// Horizontal divider.
    Rule,
    /// List item with its bullet kind and leading-whitespace width.
    ListItem {
        bullet: Bullet,
        indent: usize,
        text: String,
    },
    /// Pipe table.
    Table(Table),
    /// Fenced code, newline-joined and uncleaned.
    CodeBlock { text: String },
    /// Plain text line.
    Paragraph { text: String },
    /// Vertical whitespace from a blank line.
    Spacer,
}

impl Block {
    /// Short lowercase name of the variant, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Heading { .. } => "heading",
            Self::Rule => "rule",
            Self::ListItem { .. } => "list_item",
            Self::Table(_) => "table",
            Self::CodeBlock { .. } => "code_block",
            Self::Paragraph { .. } => "paragraph",
            Self::Spacer => "spacer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_glyphs() {
        assert_eq!(Bullet::Bulleted.glyph(), '•');
        assert_eq!(Bullet::Numbered.glyph(), '○');
    }

    #[test]
    fn test_table_counts_ragged_rows() {
        let table = Table {
            header: vec!["a".to_owned(), "b".to_owned()],
            rows: vec![vec!["1".to_owned()], vec!["1".into(), "2".into(), "3".into()]],
        };
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.all_rows().count(), 3);
    }

    #[test]
    fn test_block_kind() {
        assert_eq!(Block::Spacer.kind(), "spacer");
        assert_eq!(Block::Table(Table::default()).kind(), "table");
    }
}
