//! HTML parsing support.
//!
//! Parses an HTML string with `scraper` (html5ever underneath) and converts it
//! into the owned [`Document`] tree the converter walks. html5ever recovers
//! from malformed markup; the only failure is nesting deeper than
//! [`MAX_DEPTH`].

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::error::{ConvertError, Direction, Result};
use crate::node::{Document, Element, Node};

/// Deepest element nesting the converter accepts. Every walk over the tree
/// recurses once per level, so this bounds stack use.
pub const MAX_DEPTH: usize = 512;

pub(crate) fn too_deep() -> ConvertError {
    tracing::warn!(limit = MAX_DEPTH, "Nesting too deep");
    ConvertError::Conversion {
        direction: Direction::HtmlToMarkdown,
        message: format!("nesting too deep (more than {MAX_DEPTH} levels)"),
    }
}

/// Parse an HTML fragment into a [`Document`].
///
/// The fragment may contain any number of top-level nodes. Comments,
/// doctypes and processing instructions are dropped. Markup nested deeper
/// than [`MAX_DEPTH`] elements is rejected.
///
/// # Example
///
/// ```rust
/// use markbridge::parse_html;
///
/// let document = parse_html("<h1>Hello <em>World</em></h1><p>Text</p>").unwrap();
/// assert_eq!(document.children.len(), 2);
/// assert!(parse_html("").unwrap().is_empty());
/// ```
pub fn parse_html(html: &str) -> Result<Document> {
    let fragment = Html::parse_fragment(html);

    // parse_fragment wraps the content in a synthetic <html> element
    let mut document = Document::new();
    for child in fragment.root_element().children() {
        match child.value() {
            ScraperNode::Text(text) => document.add_child(Node::text(&text.text)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    document.add_child(scraper_to_element(child_element, 1)?);
                }
            }
            _ => {}
        }
    }

    Ok(document)
}

/// Convert a scraper ElementRef to our Element structure
fn scraper_to_element(element: ElementRef, depth: usize) -> Result<Element> {
    if depth > MAX_DEPTH {
        return Err(too_deep());
    }

    let mut node = Element::with_attrs(element.value().name(), element.value().attrs());

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_element(child_element, depth + 1)?);
                }
            }
            _ => {}
        }
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert!(parse_html("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_strips_fragment_wrapper() {
        let document = parse_html("<p>Hello World</p>").unwrap();
        assert_eq!(document.children.len(), 1);
        let p = document.children[0].as_element().unwrap();
        assert_eq!(p.tag, "p");
        assert_eq!(p.text_content(), "Hello World");
    }

    #[test]
    fn test_parse_multiple_roots_and_text() {
        let document = parse_html("Intro <b>bold</b><p>para</p>").unwrap();
        let tags: Vec<_> = document
            .children
            .iter()
            .map(|n| n.as_element().map_or("#text", |e| e.tag.as_str()))
            .collect();
        assert_eq!(tags, ["#text", "b", "p"]);
    }

    #[test]
    fn test_parse_attributes() {
        let html = r#"<a HREF="https://example.com" title="Example">x</a>"#;
        let document = parse_html(html).unwrap();
        let a = document.children[0].as_element().unwrap();
        assert_eq!(a.attr("href"), Some("https://example.com"));
        assert_eq!(a.attr("title"), Some("Example"));
    }

    #[test]
    fn test_parse_malformed_markup() {
        let document = parse_html("<p>open <strong>never closed<p>next").unwrap();
        assert_eq!(document.children.len(), 2);
        assert!(document.text_content().contains("never closed"));
        assert!(document.text_content().contains("next"));
    }

    #[test]
    fn test_parse_drops_comments() {
        let document = parse_html("<!-- note --><p>kept</p>").unwrap();
        assert_eq!(document.children.len(), 1);
    }

    #[test]
    fn test_parse_unknown_tags_as_containers() {
        let document = parse_html("<widget><em>inside</em></widget>").unwrap();
        let widget = document.children[0].as_element().unwrap();
        assert_eq!(widget.tag, "widget");
        assert_eq!(widget.first_element_child().map(|e| e.tag.as_str()), Some("em"));
    }

    #[test]
    fn test_parse_rejects_deep_nesting() {
        let at_limit = format!("{}x", "<div>".repeat(MAX_DEPTH));
        assert!(parse_html(&at_limit).is_ok());

        let too_deep = format!("{}x", "<div>".repeat(MAX_DEPTH + 1));
        let err = parse_html(&too_deep).unwrap_err();
        assert_eq!(err.direction(), Some(Direction::HtmlToMarkdown));
        assert!(err.to_string().contains("nesting too deep"));
    }
}
