//! Styled runs from the inline markup subset (`<b>`, `<i>`, `<code>`).

/// A stretch of text with uniform inline styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Run {
    pub(crate) text: String,
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    pub(crate) code: bool,
}

#[derive(Clone, Copy)]
enum Mark {
    Bold,
    Italic,
    Code,
}

const TAGS: [(&str, Mark, bool); 6] = [
    ("<b>", Mark::Bold, true),
    ("</b>", Mark::Bold, false),
    ("<i>", Mark::Italic, true),
    ("</i>", Mark::Italic, false),
    ("<code>", Mark::Code, true),
    ("</code>", Mark::Code, false),
];

const ENTITIES: [(&str, char); 6] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#x27;", '\''),
    ("&nbsp;", '\u{a0}'),
];

/// Nesting depth of each mark.
#[derive(Default)]
struct Depths {
    bold: u32,
    italic: u32,
    code: u32,
}

impl Depths {
    fn apply(&mut self, mark: Mark, open: bool) {
        let depth = match mark {
            Mark::Bold => &mut self.bold,
            Mark::Italic => &mut self.italic,
            Mark::Code => &mut self.code,
        };
        *depth = if open {
            depth.saturating_add(1)
        } else {
            depth.saturating_sub(1)
        };
    }

    fn run(&self, text: String) -> Run {
        Run {
            text,
            bold: self.bold > 0,
            italic: self.italic > 0,
            code: self.code > 0,
        }
    }
}

/// Split marked-up text into styled runs.
///
/// Recognised tags toggle styles and may nest; unbalanced closing tags are
/// ignored. Anything else, including unknown tags and stray `<` or `&`, is
/// literal text.
pub(crate) fn parse_runs(markup: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut depths = Depths::default();
    let mut text = String::new();
    let mut rest = markup;

    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some((tag, mark, open)) = TAGS.iter().find(|(tag, ..)| rest.starts_with(tag))
        {
            if !text.is_empty() {
                runs.push(depths.run(std::mem::take(&mut text)));
            }
            depths.apply(*mark, *open);
            rest = &rest[tag.len()..];
            continue;
        }

        if c == '&'
            && let Some((entity, decoded)) = ENTITIES.iter().find(|(e, _)| rest.starts_with(e))
        {
            text.push(*decoded);
            rest = &rest[entity.len()..];
            continue;
        }

        text.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !text.is_empty() {
        runs.push(depths.run(text));
    }
    runs
}

/// Text content with all markup removed.
pub(crate) fn plain_text(markup: &str) -> String {
    parse_runs(markup).into_iter().map(|run| run.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str, bold: bool, italic: bool, code: bool) -> Run {
        Run {
            text: text.to_owned(),
            bold,
            italic,
            code,
        }
    }

    #[test]
    fn test_plain() {
        assert_eq!(parse_runs("plain"), vec![run("plain", false, false, false)]);
        assert!(parse_runs("").is_empty());
    }

    #[test]
    fn test_styled_runs() {
        assert_eq!(
            parse_runs("a <b>bold</b> and <code>x()</code>"),
            vec![
                run("a ", false, false, false),
                run("bold", true, false, false),
                run(" and ", false, false, false),
                run("x()", false, false, true),
            ]
        );
    }

    #[test]
    fn test_nested_marks() {
        assert_eq!(
            parse_runs("<b>bold <i>both</i></b>"),
            vec![
                run("bold ", true, false, false),
                run("both", true, true, false),
            ]
        );
    }

    #[test]
    fn test_literal_angle_brackets_and_entities() {
        assert_eq!(
            parse_runs("a < b &lt;c&gt; R&D &amp;"),
            vec![run("a < b <c> R&D &", false, false, false)]
        );
        assert_eq!(
            parse_runs("<span>x</span>"),
            vec![run("<span>x</span>", false, false, false)]
        );
    }

    #[test]
    fn test_unbalanced_close_is_ignored() {
        assert_eq!(
            parse_runs("x</b>y"),
            vec![run("x", false, false, false), run("y", false, false, false)]
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<b>Smart</b> Plug &amp; Hub"), "Smart Plug & Hub");
        assert_eq!(plain_text("it&#x27;s &quot;on&quot;"), "it's \"on\"");
    }
}
