//! Markdown to HTML rendering (GitHub Flavored Markdown).

use comrak::{markdown_to_html, Options};

use crate::error::{guard, Direction};
use crate::Result;

/// Tables, strikethrough, task lists and autolinks; single newlines stay soft.
fn gfm_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options.render.hardbreaks = false;
    // Content comes from a trusted editor, inline HTML is passed through
    options.render.unsafe_ = true;
    options
}

/// Render Markdown to HTML.
///
/// ```rust
/// let html = markbridge::render_markdown("# Title\n\nSome *text*").unwrap();
/// assert_eq!(html, "<h1>Title</h1>\n<p>Some <em>text</em></p>\n");
/// ```
pub fn render_markdown(markdown: &str) -> Result<String> {
    guard(Direction::MarkdownToHtml, markdown.len(), || {
        markdown_to_html(markdown, &gfm_options())
    })
}
