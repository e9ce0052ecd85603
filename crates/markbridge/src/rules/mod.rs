//! Rule system for HTML to Markdown conversion.
//!
//! Rules are kept in registration order. Lookup walks them newest first, so a
//! rule registered later (or re-registered under the same key) supersedes any
//! earlier rule matching the same element.

mod article;
mod commonmark;
mod gfm;
mod rule;

pub use article::article_overrides;
pub use commonmark::commonmark_rules;
pub use gfm::gfm;
pub use rule::{Filter, PredicateFn, ReplacementFn, Rule};

use indexmap::IndexMap;

use crate::node::NodeRef;
use crate::service::ConverterOptions;

/// Collection of rules for conversion
pub struct Rules {
    /// Replacement rules by key, oldest first
    rules: IndexMap<String, Rule>,
    /// Keep rules (preserve as HTML)
    keep_rules: Vec<Filter>,
    /// Remove rules (remove entirely)
    remove_rules: Vec<Filter>,
}

impl Rules {
    /// Create a new Rules instance with CommonMark rules
    pub fn new() -> Self {
        let mut rules = Self::empty();
        for (key, rule) in commonmark_rules() {
            rules.add(key, rule);
        }
        rules
    }

    /// Create a Rules instance with no rules at all
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
            keep_rules: Vec::new(),
            remove_rules: Vec::new(),
        }
    }

    /// Register a rule. An existing rule with the same key is dropped and the
    /// new one takes the newest position.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.rules.shift_remove(key);
        self.rules.insert(key.to_string(), rule);
    }

    /// Add a keep filter
    pub fn keep(&mut self, filter: Filter) {
        self.keep_rules.push(filter);
    }

    /// Add a remove filter
    pub fn remove(&mut self, filter: Filter) {
        self.remove_rules.push(filter);
    }

    /// Find the newest rule matching a node
    pub fn for_node<'a>(&'a self, node: &NodeRef, options: &ConverterOptions) -> Option<&'a Rule> {
        let tag = node.tag_name();
        self.rules
            .values()
            .rev()
            .find(|rule| rule.filter.matches(tag, node, options))
    }

    /// Check if a node should be kept as HTML
    pub fn should_keep(&self, node: &NodeRef, options: &ConverterOptions) -> bool {
        let tag = node.tag_name();
        self.keep_rules
            .iter()
            .any(|filter| filter.matches(tag, node, options))
    }

    /// Check if a node should be removed
    pub fn should_remove(&self, node: &NodeRef, options: &ConverterOptions) -> bool {
        let tag = node.tag_name();
        self.remove_rules
            .iter()
            .any(|filter| filter.matches(tag, node, options))
    }

    /// Get the keep replacement for a node
    pub fn keep_replacement(&self, node: &NodeRef) -> String {
        if node.is_block() {
            format!("\n\n{}\n\n", node.outer_html())
        } else {
            node.outer_html()
        }
    }

    /// Rule keys, oldest first
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .field("keep_rules", &self.keep_rules.len())
            .field("remove_rules", &self.remove_rules.len())
            .finish()
    }
}
