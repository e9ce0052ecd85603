//! Utility functions and constants for HTML processing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::{Element, Node};

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements that have meaning even when blank
pub const MEANINGFUL_WHEN_BLANK: &[&str] = &[
    "a", "table", "thead", "tbody", "tfoot", "th", "td", "iframe", "script",
    "audio", "video",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is meaningful when blank
pub fn is_meaningful_when_blank(tag: &str) -> bool {
    MEANINGFUL_WHEN_BLANK.contains(&tag.to_lowercase().as_str())
}

/// An element with no text and nothing void or meaningful inside it.
pub fn is_blank(element: &Element) -> bool {
    !element.is_void() && !is_meaningful_when_blank(&element.tag) && is_blank_subtree(element)
}

fn is_blank_subtree(element: &Element) -> bool {
    element.children.iter().all(|child| match child {
        Node::Text(text) => text.trim().is_empty(),
        Node::Element(inner) => {
            !inner.is_void() && !is_meaningful_when_blank(&inner.tag) && is_blank_subtree(inner)
        }
    })
}

static ESCAPES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\\", r"\\"),
        (r"\*", r"\*"),
        (r"^-", r"\-"),
        (r"^\+ ", r"\+ "),
        (r"^(=+)", r"\${1}"),
        (r"^(#{1,6}) ", r"\${1} "),
        (r"`", r"\`"),
        (r"^~~~", r"\~~~"),
        (r"\[", r"\["),
        (r"\]", r"\]"),
        (r"^>", r"\>"),
        (r"_", r"\_"),
        (r"^(\d+)\. ", r"${1}\. "),
        (r"<([A-Za-z/!?])", r"\<${1}"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (Regex::new(pattern).expect("escape pattern is valid"), replacement)
    })
    .collect()
});

/// Escape markdown special characters in a text node.
///
/// Characters that start a block (`-`, `+ `, `#`, `>`, `1. `, `=`) are only
/// escaped at the start of the text. A `<` that could open a tag is escaped
/// so typed markup stays text.
pub fn escape_markdown(text: &str) -> String {
    ESCAPES
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Collapse runs of ASCII whitespace in text to a single space.
///
/// Other whitespace such as `&nbsp;` is content and stays.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if matches!(c, ' ' | '\t' | '\r' | '\n') {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Append a rendered fragment, merging the newlines at the seam.
///
/// The separator is the larger of the trailing newline count of `output` and
/// the leading newline count of `fragment`, capped at two.
pub fn join(output: &mut String, fragment: &str) {
    let kept = output.trim_end_matches('\n').len();
    let trailing = output.len() - kept;
    let trimmed = fragment.trim_start_matches('\n');
    let leading = fragment.len() - trimmed.len();

    output.truncate(kept);
    for _ in 0..trailing.max(leading).min(2) {
        output.push('\n');
    }
    output.push_str(trimmed);
}
