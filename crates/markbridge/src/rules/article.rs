//! Overrides used by the article converter on top of CommonMark and GFM.

use super::commonmark::heading_level;
use super::{Filter, Rule};
use crate::service::HtmlConverter;

/// ATX headings regardless of options, double tilde strikethrough, and no
/// script or style content.
pub fn article_overrides(converter: &mut HtmlConverter) {
    converter.add_rule(
        "heading",
        Rule::for_tags(&["h1", "h2", "h3", "h4", "h5", "h6"], |node, content, _| {
            let level = heading_level(node.tag_name());
            format!("\n\n{} {}\n\n", "#".repeat(level), content)
        }),
    );

    converter.add_rule(
        "strikethrough",
        Rule::for_tags(&["del", "s", "strike"], |_, content, _| {
            format!("~~{}~~", content)
        }),
    );

    converter.remove(Filter::tags(&["script", "style", "noscript", "template"]));
}
