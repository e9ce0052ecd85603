//! HtmlConverter - the rule driven HTML to Markdown converter.

use crate::error::{guard, Direction};
use crate::html::{parse_html, too_deep, MAX_DEPTH};
use crate::node::{Document, Node, NodeRef};
use crate::rules::{Filter, Rule, Rules};
use crate::utilities::{escape_markdown, is_blank, join};
use crate::whitespace::collapse_document;
use crate::Result;

/// Heading style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// Use setext-style headings (underlined with = or -)
    #[default]
    Setext,
    /// Use ATX-style headings (prefixed with #)
    Atx,
}

/// Code block style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeBlockStyle {
    /// Use indented code blocks (4 spaces)
    #[default]
    Indented,
    /// Use fenced code blocks (```)
    Fenced,
}

/// Options for HtmlConverter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Heading style (setext or atx)
    pub heading_style: HeadingStyle,

    /// Horizontal rule string
    pub hr: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Code block style
    pub code_block_style: CodeBlockStyle,

    /// Fence string for fenced code blocks
    pub fence: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Text emitted before the newline of a `<br>`
    pub br: String,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Setext,
            hr: "* * *".to_string(),
            bullet_list_marker: '*',
            code_block_style: CodeBlockStyle::Indented,
            fence: "```".to_string(),
            em_delimiter: '_',
            strong_delimiter: "**".to_string(),
            br: "  ".to_string(),
        }
    }
}

impl ConverterOptions {
    /// ATX headings, fenced code, `-` bullets and `*` emphasis
    pub fn article() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            bullet_list_marker: '-',
            code_block_style: CodeBlockStyle::Fenced,
            em_delimiter: '*',
            ..Self::default()
        }
    }
}

/// Converts HTML to Markdown by applying the first matching rule to every
/// element, children first.
///
/// A converter is immutable once built and can be shared between threads.
#[derive(Debug)]
pub struct HtmlConverter {
    options: ConverterOptions,
    rules: Rules,
}

impl HtmlConverter {
    /// Create a new HtmlConverter with default options
    pub fn new() -> Self {
        Self::with_options(ConverterOptions::default())
    }

    /// Create an HtmlConverter with custom options
    pub fn with_options(options: ConverterOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert an HTML fragment to Markdown
    pub fn convert(&self, html: &str) -> Result<String> {
        let document = parse_html(html)?;
        guard(Direction::HtmlToMarkdown, html.len(), || self.render(document))
    }

    /// Convert an already parsed document to Markdown
    pub fn convert_document(&self, document: &Document) -> Result<String> {
        if document.depth() > MAX_DEPTH {
            return Err(too_deep());
        }
        guard(Direction::HtmlToMarkdown, document.text_content().len(), || {
            self.render(document.clone())
        })
    }

    /// Add a rule. A rule under an existing key replaces it; any new rule
    /// takes precedence over earlier rules matching the same element.
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Keep elements matching the filter as HTML
    pub fn keep(&mut self, filter: Filter) -> &mut Self {
        self.rules.keep(filter);
        self
    }

    /// Remove elements matching the filter
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Escape markdown special characters in a string
    pub fn escape(&self, text: &str) -> String {
        escape_markdown(text)
    }

    /// Get the current options
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ConverterOptions {
        &mut self.options
    }

    /// Registered rules
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn render(&self, mut document: Document) -> String {
        collapse_document(&mut document);
        let output = self.process_nodes(&document.children, None, false);
        post_process(&output)
    }

    fn process_nodes<'a>(
        &self,
        nodes: &'a [Node],
        parent: Option<&'a NodeRef<'a>>,
        in_code: bool,
    ) -> String {
        let mut output = String::new();

        for (index, child) in nodes.iter().enumerate() {
            let fragment = match child {
                Node::Text(text) if in_code => text.clone(),
                Node::Text(text) => escape_markdown(text),
                Node::Element(element) => {
                    let node = NodeRef::in_tree(element, parent, nodes, index);
                    self.replace_element(&node, in_code)
                }
            };
            join(&mut output, &fragment);
        }

        output
    }

    /// Blank elements first, then rules newest first, then keep and remove
    /// filters, then the default.
    fn replace_element(&self, node: &NodeRef<'_>, in_code: bool) -> String {
        let (leading, trailing) = flanking_whitespace(node);
        let trim = !leading.is_empty() || !trailing.is_empty();

        let replacement = if is_blank(node.element) {
            if node.is_block() {
                "\n\n".to_string()
            } else {
                String::new()
            }
        } else if let Some(rule) = self.rules.for_node(node, &self.options) {
            let content = self.content(node, in_code, trim);
            rule.replace(node, &content, &self.options)
        } else if self.rules.should_keep(node, &self.options) {
            self.rules.keep_replacement(node)
        } else if self.rules.should_remove(node, &self.options) {
            String::new()
        } else {
            let content = self.content(node, in_code, trim);
            if node.is_block() {
                format!("\n\n{}\n\n", content)
            } else {
                content
            }
        };

        format!("{}{}{}", leading, replacement, trailing)
    }

    fn content(&self, node: &NodeRef<'_>, in_code: bool, trim: bool) -> String {
        let in_code = in_code || node.tag_name() == "code";
        let content = self.process_nodes(node.children(), Some(node), in_code);
        if trim {
            content.trim().to_string()
        } else {
            content
        }
    }
}

impl Default for HtmlConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Whitespace at the edges of an inline element's text, moved outside its
/// Markdown. The ASCII part is dropped when the neighbour already supplies a
/// space.
fn flanking_whitespace(node: &NodeRef<'_>) -> (String, String) {
    if node.is_block() {
        return (String::new(), String::new());
    }

    let text = node.text_content();
    let body = text.trim_start();
    let leading = &text[..text.len() - body.len()];
    let trailing = &body[body.trim_end().len()..];

    let leading = if leading.starts_with(is_ascii_space)
        && flanked(node.previous_sibling(), Side::Left)
    {
        leading.trim_start_matches(is_ascii_space)
    } else {
        leading
    };
    let trailing = if trailing.ends_with(is_ascii_space)
        && flanked(node.next_sibling(), Side::Right)
    {
        trailing.trim_end_matches(is_ascii_space)
    } else {
        trailing
    };

    (leading.to_string(), trailing.to_string())
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

fn flanked(sibling: Option<&Node>, side: Side) -> bool {
    let touches = |text: &str| match side {
        Side::Left => text.ends_with(' '),
        Side::Right => text.starts_with(' '),
    };

    match sibling {
        Some(Node::Text(text)) => touches(text),
        Some(Node::Element(element)) if !element.is_block() => touches(&element.text_content()),
        _ => false,
    }
}

/// Strip leading line breaks and any trailing whitespace
fn post_process(output: &str) -> String {
    output
        .trim_start_matches(['\t', '\r', '\n'])
        .trim_end()
        .to_string()
}
