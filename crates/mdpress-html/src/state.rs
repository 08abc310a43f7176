//! Context tracked while walking markdown events.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::Alignment;

/// Fenced or indented code block being collected.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Column alignments and position inside the current table.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Inline style attribute for the current cell, empty when unaligned.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Alt text capture for an image whose tag is still open.
#[derive(Default)]
pub(crate) struct ImageState {
    /// Source and title of the pending image.
    pending: Option<(String, String)>,
    alt_text: String,
}

impl ImageState {
    pub(crate) fn start(&mut self, src: String, title: String) {
        self.pending = Some((src, title));
        self.alt_text.clear();
    }

    /// Finish the image and return (src, title, alt).
    pub(crate) fn end(&mut self) -> Option<(String, String, String)> {
        let (src, title) = self.pending.take()?;
        Some((src, title, std::mem::take(&mut self.alt_text)))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A heading closed by [`HeadingState::complete_heading`].
pub(crate) struct CompletedHeading {
    pub(crate) level: u8,
    pub(crate) id: String,
    pub(crate) html: String,
}

/// Heading ids, table of contents and title extraction.
#[derive(Default)]
pub(crate) struct HeadingState {
    /// Text of the first H1.
    title: Option<String>,
    /// Level of the heading being collected.
    current_level: Option<u8>,
    /// Plain text of the current heading (slug and ToC).
    text: String,
    /// HTML of the current heading (inline formatting kept).
    html: String,
    toc: Vec<TocEntry>,
    /// Next suffix to try for each slug.
    id_counts: HashMap<String, usize>,
    issued_ids: HashSet<String>,
}

impl HeadingState {
    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Close the current heading.
    ///
    /// The first H1 becomes the document title and is kept out of the
    /// table of contents; it is still rendered.
    pub(crate) fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let id = self.generate_id(&text);

        let title = text.trim().to_owned();
        if level == 1 && self.title.is_none() {
            self.title = Some(title);
        } else {
            self.toc.push(TocEntry {
                level,
                title,
                id: id.clone(),
            });
        }

        Some(CompletedHeading { level, id, html })
    }

    /// Unique id: repeated slugs get `-1`, `-2`, … suffixes, skipping any
    /// id already issued to another heading.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = match slugify(text) {
            slug if slug.is_empty() => "section".to_owned(),
            slug => slug,
        };
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let mut id = match *count {
            0 => base_id.clone(),
            n => format!("{base_id}-{n}"),
        };
        while self.issued_ids.contains(&id) {
            *count += 1;
            id = format!("{base_id}-{count}");
        }
        *count += 1;
        self.issued_ids.insert(id.clone());
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Convert text to URL-safe slug.
///
/// Lowercases ASCII alphanumerics, collapses whitespace, dashes and
/// underscores into single dashes, and drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hardware Design"), "hardware-design");
        assert_eq!(slugify("What's Next?"), "whats-next");
        assert_eq!(slugify("  1. Overview  "), "1-overview");
        assert_eq!(slugify("ESP32 -- MQTT_bridge"), "esp32-mqtt-bridge");
        assert_eq!(slugify("🚀 Launch"), "launch");
    }

    #[test]
    fn test_table_alignment_styles() {
        let mut state = TableState::default();
        state.start(vec![Alignment::None, Alignment::Center, Alignment::Right]);
        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(state.current_alignment_style(), "");
        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:center""#
        );
        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:right""#
        );
        state.next_cell();
        assert_eq!(state.current_alignment_style(), "");
        state.end_head();
        assert!(!state.is_in_head());
    }

    #[test]
    fn test_first_h1_is_title_not_toc() {
        let mut state = HeadingState::default();

        state.start_heading(1);
        state.push_text("Smart Plug Report");
        let heading = state.complete_heading().unwrap();
        assert_eq!(heading.id, "smart-plug-report");

        state.start_heading(1);
        state.push_text("Appendix");
        state.complete_heading().unwrap();

        assert_eq!(state.take_title().as_deref(), Some("Smart Plug Report"));
        let toc = state.take_toc();
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].title, "Appendix");
    }

    fn heading_ids(state: &mut HeadingState, titles: &[&str]) -> Vec<String> {
        titles
            .iter()
            .map(|title| {
                state.start_heading(2);
                state.push_text(title);
                state.complete_heading().unwrap().id
            })
            .collect()
    }

    #[test]
    fn test_suffixed_id_does_not_collide_with_later_slug() {
        let mut state = HeadingState::default();
        assert_eq!(
            heading_ids(&mut state, &["Results", "Results", "Results 1"]),
            ["results", "results-1", "results-1-1"]
        );

        let mut state = HeadingState::default();
        assert_eq!(
            heading_ids(&mut state, &["Results 1", "Results", "Results"]),
            ["results-1", "results", "results-2"]
        );
    }

    #[test]
    fn test_empty_slug_falls_back() {
        let mut state = HeadingState::default();
        state.start_heading(2);
        state.push_text("✅");
        assert_eq!(state.complete_heading().unwrap().id, "section");
    }

    #[test]
    fn test_image_state() {
        let mut state = ImageState::default();
        assert!(!state.is_active());
        state.start("wiring.png".to_owned(), String::new());
        assert!(state.is_active());
        state.push_str("Wiring");
        let (src, title, alt) = state.end().unwrap();
        assert_eq!((src.as_str(), title.as_str(), alt.as_str()), ("wiring.png", "", "Wiring"));
        assert!(!state.is_active());
    }
}
