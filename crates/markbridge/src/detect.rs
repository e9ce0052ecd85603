//! Heuristic check for whether a string is Markdown source.

use once_cell::sync::Lazy;
use regex::RegexSet;

use crate::input::Input;

/// Any match means the text looks like Markdown
static MARKDOWN_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?m)^#{1,6}\s",    // heading
        r"\*\*.+\*\*",       // bold
        r"\*[^*]+\*",        // italic
        r"\[.*\]\(.*\)",     // link
        r"(?m)^[-*+]\s",     // list item
        r"(?m)^>\s",         // blockquote
        r"```",              // code fence
    ])
    .expect("markdown patterns are valid")
});

/// Check whether `text` contains common Markdown syntax.
///
/// Surrounding whitespace is ignored; empty text is never Markdown.
pub fn looks_like_markdown(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && MARKDOWN_PATTERNS.is_match(text)
}

/// [`looks_like_markdown`] for any input; non-text is never Markdown.
///
/// ```rust
/// use markbridge::{detect_markdown, Input};
///
/// assert!(detect_markdown("# Header"));
/// assert!(!detect_markdown("#NoSpace"));
/// assert!(!detect_markdown(Input::Other("number")));
/// assert!(!detect_markdown(None::<&str>));
/// ```
pub fn detect_markdown<'a>(input: impl Into<Input<'a>>) -> bool {
    input.into().as_text().is_some_and(looks_like_markdown)
}
