//! Whitespace collapsing over a parsed document, run before any rule.
//!
//! Runs of ASCII whitespace in text become a single space. A space is dropped
//! when the text before it already ended in one, even across inline element
//! boundaries, and spaces touching a block element or `<br>` are dropped
//! entirely. Text inside `<pre>` is left as written.

use crate::node::{Document, Element, Node};
use crate::utilities::collapse_whitespace;

enum Token {
    Text(String),
    /// Block element or `<br>`
    Boundary,
    /// Void inline element; the next text keeps its leading space
    Opaque,
    Inline,
}

/// Collapse whitespace in every text node of `document`, dropping text nodes
/// that end up empty.
pub fn collapse_document(document: &mut Document) {
    let mut tokens = Vec::new();
    flatten(&document.children, &mut tokens);

    let mut texts = collapse_tokens(tokens).into_iter();
    apply(&mut document.children, &mut texts);
}

fn element_token(element: &Element) -> Token {
    if element.is_block() || element.tag == "br" {
        Token::Boundary
    } else if element.is_void() {
        Token::Opaque
    } else {
        Token::Inline
    }
}

/// Document order; elements with children are visited on entry and on exit
fn flatten(nodes: &[Node], tokens: &mut Vec<Token>) {
    for node in nodes {
        match node {
            Node::Text(text) => tokens.push(Token::Text(collapse_whitespace(text))),
            Node::Element(element) => {
                tokens.push(element_token(element));
                if element.tag != "pre" && !element.children.is_empty() {
                    flatten(&element.children, tokens);
                    tokens.push(element_token(element));
                }
            }
        }
    }
}

fn collapse_tokens(tokens: Vec<Token>) -> Vec<String> {
    let mut texts: Vec<String> = Vec::new();
    let mut prev_text: Option<usize> = None;
    let mut keep_leading = false;

    for token in tokens {
        match token {
            Token::Text(mut text) => {
                let after_space = prev_text.map_or(true, |i| texts[i].ends_with(' '));
                if after_space && !keep_leading && text.starts_with(' ') {
                    text.remove(0);
                }
                if !text.is_empty() {
                    prev_text = Some(texts.len());
                }
                texts.push(text);
            }
            Token::Boundary => {
                if let Some(i) = prev_text.take() {
                    trim_trailing_space(&mut texts[i]);
                }
                keep_leading = false;
            }
            Token::Opaque => {
                prev_text = None;
                keep_leading = true;
            }
            Token::Inline => {
                if prev_text.is_some() {
                    keep_leading = false;
                }
            }
        }
    }

    if let Some(i) = prev_text {
        trim_trailing_space(&mut texts[i]);
    }

    texts
}

fn trim_trailing_space(text: &mut String) {
    if text.ends_with(' ') {
        text.pop();
    }
}

/// Write collapsed texts back in the order `flatten` produced them
fn apply<I>(nodes: &mut Vec<Node>, texts: &mut I)
where
    I: Iterator<Item = String>,
{
    nodes.retain_mut(|node| match node {
        Node::Text(text) => {
            *text = texts.next().unwrap_or_default();
            !text.is_empty()
        }
        Node::Element(element) => {
            if element.tag != "pre" {
                apply(&mut element.children, &mut *texts);
            }
            true
        }
    });
}
