//! Inline markup cleaning.
//!
//! Rewrites markdown emphasis, code spans and links into the `<b>`, `<i>`,
//! `<code>` subset understood by the document builders.

use std::sync::LazyLock;

use regex::Regex;

/// Pictographs used as section markers in reports. The standard PDF fonts
/// cannot draw them, so they are removed. Includes the emoji variation selector.
static DECORATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[✅❌📱🎯🏗🔧📊🧪📡🔐📈🎓🔮📝📞🚀🌍\u{FE0F}]").unwrap()
});

/// Substitutions in application order. Later patterns see the output of
/// earlier ones, so `` **`x`** `` becomes `<b><code>x</code></b>`.
static SUBSTITUTIONS: LazyLock<[(Regex, &'static str); 6]> = LazyLock::new(|| {
    [
        (Regex::new(r"\*\*(.+?)\*\*").unwrap(), "<b>${1}</b>"),
        (Regex::new(r"__(.+?)__").unwrap(), "<b>${1}</b>"),
        (Regex::new(r"\*(.+?)\*").unwrap(), "<i>${1}</i>"),
        (Regex::new(r"_(.+?)_").unwrap(), "<i>${1}</i>"),
        (Regex::new(r"`(.+?)`").unwrap(), "<code>${1}</code>"),
        (Regex::new(r"\[(.+?)\]\(.+?\)").unwrap(), "${1}"),
    ]
});

/// Convert inline markdown markup to the block markup subset.
///
/// Link targets are discarded; only the link text is kept. Text that carries
/// no markdown markup is returned unchanged, so cleaning is idempotent on
/// clean text.
///
/// # Example
///
/// ```
/// use mdpress_blocks::clean_inline;
///
/// assert_eq!(
///     clean_inline("**Status**: see [docs](https://example.com)"),
///     "<b>Status</b>: see docs"
/// );
/// ```
#[must_use]
pub fn clean_inline(text: &str) -> String {
    let mut result = DECORATIVE.replace_all(text, "").into_owned();
    for (pattern, replacement) in SUBSTITUTIONS.iter() {
        result = pattern.replace_all(&result, *replacement).into_owned();
    }
    result
}
