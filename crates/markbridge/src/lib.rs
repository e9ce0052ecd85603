//! # markbridge
//!
//! Convert between HTML and Markdown for article editing.
//!
//! HTML to Markdown runs a rule table inspired by
//! [turndown](https://github.com/mixmark-io/turndown) over a parsed fragment,
//! Markdown to HTML renders GitHub Flavored Markdown with `comrak`, and a
//! small heuristic tells whether a string looks like Markdown at all.
//!
//! ## Example
//!
//! ```rust
//! let markdown = markbridge::html_to_markdown(
//!     "<h1>Hello World</h1><p>This is <strong>bold</strong>.</p>",
//! )
//! .unwrap();
//! assert_eq!(markdown, "# Hello World\n\nThis is **bold**.");
//!
//! let html = markbridge::markdown_to_html("# Hello\n\nThis is **bold**").unwrap();
//! assert!(html.contains("<h1>Hello</h1>"));
//!
//! assert!(markbridge::detect_markdown("- item"));
//! ```
//!
//! ## Custom rules
//!
//! ```rust
//! use markbridge::{gfm, HtmlConverter, Rule};
//!
//! let mut converter = HtmlConverter::new();
//! converter.use_plugin(gfm).add_rule(
//!     "mark",
//!     Rule::for_tag("mark", |_, content, _| format!("=={}==", content)),
//! );
//! assert_eq!(converter.convert("<mark>hi</mark>").unwrap(), "==hi==");
//! ```

mod detect;
mod error;
pub mod html;
mod input;
pub mod node;
mod normalize;
mod render;
mod rules;
mod service;
mod utilities;
mod whitespace;

use once_cell::sync::Lazy;

pub use detect::{detect_markdown, looks_like_markdown};
pub use error::{ConvertError, Direction, Result};
pub use html::{parse_html, MAX_DEPTH};
pub use input::Input;
pub use node::{Document, Element, Node, NodeRef};
pub use normalize::normalize_list_markers;
pub use render::render_markdown;
pub use rules::{article_overrides, gfm, Filter, PredicateFn, ReplacementFn, Rule, Rules};
pub use service::{CodeBlockStyle, ConverterOptions, HeadingStyle, HtmlConverter};
pub use utilities::escape_markdown;

static ARTICLE_CONVERTER: Lazy<HtmlConverter> = Lazy::new(|| {
    let mut converter = HtmlConverter::with_options(ConverterOptions::article());
    converter.use_plugin(gfm).use_plugin(article_overrides);
    converter
});

/// The converter behind [`html_to_markdown`]: article options with GFM and
/// the article overrides applied.
pub fn article_converter() -> &'static HtmlConverter {
    &ARTICLE_CONVERTER
}

/// Convert editor HTML to Markdown.
///
/// Fails with [`ConvertError::InvalidInput`] before any parsing when the input
/// is not text, and with [`ConvertError::Conversion`] if conversion breaks.
pub fn html_to_markdown<'a>(html: impl Into<Input<'a>>) -> Result<String> {
    let html = html.into().require_text()?;
    let markdown = article_converter().convert(html)?;
    Ok(normalize_list_markers(&markdown))
}

/// Render stored Markdown to HTML for the editor.
pub fn markdown_to_html<'a>(markdown: impl Into<Input<'a>>) -> Result<String> {
    let markdown = markdown.into().require_text()?;
    render_markdown(markdown)
}
