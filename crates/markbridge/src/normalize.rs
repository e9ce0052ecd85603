//! List marker normalization for converted Markdown.
//!
//! The converter pads list markers to four columns (`-   item`) and indents
//! nested lists by that width. This pass rewrites such lines to a single space
//! after the marker and halves every four-space indent group.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PADDED_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)([-*+]|\d+\.) {3}([^ \n]|$)").expect("list marker pattern is valid")
});

/// Rewrite `(indent)(marker)` + exactly three spaces to a single space and
/// collapse the indent from four-space to two-space groups.
///
/// Lines that do not have exactly three spaces after the marker are left
/// alone, so applying this twice gives the same result as applying it once.
///
/// ```rust
/// use markbridge::normalize_list_markers;
///
/// let markdown = "-   Item 1\n    -   Nested 1\n1.  First";
/// assert_eq!(
///     normalize_list_markers(markdown),
///     "- Item 1\n  - Nested 1\n1.  First"
/// );
/// ```
pub fn normalize_list_markers(markdown: &str) -> String {
    PADDED_MARKER
        .replace_all(markdown, |caps: &Captures| {
            format!("{}{} {}", caps[1].replace("    ", "  "), &caps[2], &caps[3])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_markers() {
        assert_eq!(normalize_list_markers("-   One\n-   Two"), "- One\n- Two");
        assert_eq!(normalize_list_markers("*   One"), "* One");
        assert_eq!(normalize_list_markers("+   One"), "+ One");
    }

    #[test]
    fn test_nested_indent_is_halved() {
        assert_eq!(
            normalize_list_markers("-   A\n    -   B\n        -   C"),
            "- A\n  - B\n    - C"
        );
    }

    #[test]
    fn test_ordered_markers() {
        assert_eq!(normalize_list_markers("1.   One"), "1. One");
        // Two spaces after an ordered marker is already what we want
        assert_eq!(normalize_list_markers("1.  One\n2.  Two"), "1.  One\n2.  Two");
    }

    #[test]
    fn test_other_spacing_untouched() {
        assert_eq!(normalize_list_markers("- One"), "- One");
        assert_eq!(normalize_list_markers("-    four spaces"), "-    four spaces");
        assert_eq!(normalize_list_markers("text -   not a marker"), "text -   not a marker");
    }

    #[test]
    fn test_empty_item() {
        assert_eq!(normalize_list_markers("-   \n-   x"), "- \n- x");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "-   A\n    -   B\n\n1.  C",
            "-   -   nested marker",
            "    -   deep\n\n\n-   top",
        ];
        for input in inputs {
            let once = normalize_list_markers(input);
            assert_eq!(normalize_list_markers(&once), once, "input: {input:?}");
        }
    }
}
