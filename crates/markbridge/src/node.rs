//! Document tree for HTML to Markdown conversion.
//!
//! Any HTML parser can produce this structure; [`crate::parse_html`] builds it
//! from `scraper`. Tag and attribute names are stored lowercase.

use indexmap::IndexMap;

use crate::utilities::{is_block, is_void};

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data
    Text(String),
    /// An element with attributes and children
    Element(Element),
}

impl Node {
    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Create a new element node without attributes
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element::new(tag_name))
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }

    /// Reconstruct outer HTML (for keep filters)
    pub fn outer_html(&self) -> String {
        match self {
            Node::Text(text) => escape_html_text(text),
            Node::Element(element) => element.outer_html(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name, e.g. `"h1"`
    pub tag: String,
    /// Attributes in source order
    pub attrs: IndexMap<String, String>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag: tag_name.to_lowercase(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element with attributes
    pub fn with_attrs<'s>(
        tag_name: &str,
        attrs: impl IntoIterator<Item = (&'s str, &'s str)>,
    ) -> Self {
        let mut element = Self::new(tag_name);
        for (name, value) in attrs {
            element.set_attr(name, value);
        }
        element
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_lowercase(), value.to_string());
    }

    /// Check the whitespace separated `class` attribute for `class_name`
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// Add a child node
    pub fn add_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Builder form of [`Element::add_child`]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.add_child(child);
        self
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn first_element_child(&self) -> Option<&Element> {
        self.element_children().next()
    }

    /// Get all text content from this element and descendants
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    pub fn is_block(&self) -> bool {
        is_block(&self.tag)
    }

    pub fn is_void(&self) -> bool {
        is_void(&self.tag)
    }

    /// Reconstruct outer HTML
    pub fn outer_html(&self) -> String {
        let attrs = self.attributes_string();
        let open = if attrs.is_empty() {
            format!("<{}>", self.tag)
        } else {
            format!("<{} {}>", self.tag, attrs)
        };

        if self.is_void() {
            open
        } else {
            format!("{}{}</{}>", open, self.inner_html(), self.tag)
        }
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        self.children.iter().map(Node::outer_html).collect()
    }

    fn attributes_string(&self) -> String {
        self.attrs
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, escape_html_attr(value))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Root of a parsed fragment; holds zero or more top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Deepest element nesting; top-level elements sit at depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node, usize)> = self.children.iter().map(|n| (n, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            if let Node::Element(element) = node {
                deepest = deepest.max(depth);
                stack.extend(element.children.iter().map(|child| (child, depth + 1)));
            }
        }
        deepest
    }
}

impl From<Vec<Node>> for Document {
    fn from(children: Vec<Node>) -> Self {
        Self { children }
    }
}

fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A reference to an element with its position in the tree.
///
/// Rules receive a `NodeRef` so they can look at the parent chain and at
/// siblings without the tree storing parent pointers.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    /// The element itself
    pub element: &'a Element,
    parent: Option<&'a NodeRef<'a>>,
    siblings: &'a [Node],
    index: usize,
}

impl<'a> NodeRef<'a> {
    /// A reference with no parent and no siblings
    pub fn new(element: &'a Element) -> Self {
        Self {
            element,
            parent: None,
            siblings: &[],
            index: 0,
        }
    }

    /// A reference to `siblings[index]`, which must be an element
    pub(crate) fn in_tree(
        element: &'a Element,
        parent: Option<&'a NodeRef<'a>>,
        siblings: &'a [Node],
        index: usize,
    ) -> Self {
        Self {
            element,
            parent,
            siblings,
            index,
        }
    }

    pub fn tag_name(&self) -> &'a str {
        &self.element.tag
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.element.has_attr(name)
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.element.has_class(class_name)
    }

    pub fn parent(&self) -> Option<&'a NodeRef<'a>> {
        self.parent
    }

    /// Get the parent tag name if there is a parent element
    pub fn parent_tag(&self) -> Option<&'a str> {
        self.parent.map(|p| p.tag_name())
    }

    pub fn previous_sibling(&self) -> Option<&'a Node> {
        self.index.checked_sub(1).and_then(|i| self.siblings.get(i))
    }

    pub fn next_sibling(&self) -> Option<&'a Node> {
        self.siblings.get(self.index + 1)
    }

    pub fn next_element_sibling(&self) -> Option<&'a Element> {
        self.siblings
            .get(self.index + 1..)
            .and_then(|rest| rest.iter().find_map(Node::as_element))
    }

    /// Position among the parent's element children
    pub fn element_index(&self) -> usize {
        self.siblings
            .get(..self.index)
            .map_or(0, |before| before.iter().filter(|n| n.is_element()).count())
    }

    pub fn is_last_element_child(&self) -> bool {
        self.next_element_sibling().is_none()
    }

    pub fn children(&self) -> &'a [Node] {
        &self.element.children
    }

    pub fn first_child(&self) -> Option<&'a Node> {
        self.element.children.first()
    }

    pub fn element_children(&self) -> impl Iterator<Item = &'a Element> {
        self.element.element_children()
    }

    pub fn text_content(&self) -> String {
        self.element.text_content()
    }

    pub fn outer_html(&self) -> String {
        self.element.outer_html()
    }

    pub fn is_block(&self) -> bool {
        self.element.is_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let element = Element::new("DIV");
        assert_eq!(element.tag, "div");
        assert!(Node::element("div").is_element());
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let a = Element::with_attrs("a", [("HREF", "https://example.com"), ("title", "Example")]);
        assert_eq!(a.attr("href"), Some("https://example.com"));
        assert_eq!(a.attr("Title"), Some("Example"));
        assert_eq!(a.attr("class"), None);
    }

    #[test]
    fn test_has_class() {
        let code = Element::with_attrs("code", [("class", "hljs  language-rust")]);
        assert!(code.has_class("language-rust"));
        assert!(!code.has_class("language"));
    }

    #[test]
    fn test_text_content() {
        let div = Element::new("div")
            .child(Node::text("Hello "))
            .child(Element::new("span").child(Node::text("World")));
        assert_eq!(div.text_content(), "Hello World");
        assert_eq!(div.element_children().count(), 1);
    }

    #[test]
    fn test_outer_html() {
        let a = Element::with_attrs("a", [("href", "https://example.com?a=1&b=\"2\"")])
            .child(Node::text("1 < 2"));
        assert_eq!(
            a.outer_html(),
            "<a href=\"https://example.com?a=1&amp;b=&quot;2&quot;\">1 &lt; 2</a>"
        );
    }

    #[test]
    fn test_void_element_html() {
        assert_eq!(Element::new("br").outer_html(), "<br>");
        let img = Element::with_attrs("img", [("src", "test.png"), ("alt", "Test")]);
        assert_eq!(img.outer_html(), "<img src=\"test.png\" alt=\"Test\">");
    }

    #[test]
    fn test_node_ref_siblings() {
        let ul = Element::new("ul")
            .child(Node::text("\n"))
            .child(Element::new("li").child(Node::text("One")))
            .child(Node::text("\n"))
            .child(Element::new("li").child(Node::text("Two")));
        let parent = NodeRef::new(&ul);

        let Some(Node::Element(second)) = ul.children.get(3) else {
            panic!("expected an element");
        };
        let li = NodeRef::in_tree(second, Some(&parent), &ul.children, 3);

        assert_eq!(li.parent_tag(), Some("ul"));
        assert_eq!(li.element_index(), 1);
        assert!(li.is_last_element_child());
        assert_eq!(li.previous_sibling().and_then(Node::as_text), Some("\n"));
        assert!(li.next_sibling().is_none());
    }

    #[test]
    fn test_node_ref_without_tree() {
        let p = Element::new("p");
        let node = NodeRef::new(&p);
        assert!(node.parent().is_none());
        assert_eq!(node.element_index(), 0);
        assert!(node.is_last_element_child());
        assert!(node.is_block());
    }

    #[test]
    fn test_document_depth() {
        assert_eq!(Document::new().depth(), 0);
        assert_eq!(Document::from(vec![Node::text("x")]).depth(), 0);

        let mut document = Document::new();
        document.add_child(Node::text("intro"));
        document.add_child(Element::new("p"));
        let em = Element::new("em").child(Node::text("x"));
        document.add_child(Element::new("ul").child(Element::new("li").child(em)));
        assert_eq!(document.depth(), 3);
    }
}
