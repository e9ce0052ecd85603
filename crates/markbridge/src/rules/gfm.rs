//! GitHub Flavored Markdown plugin: strikethrough, tables, task list items
//! and highlighted code blocks.

use once_cell::sync::Lazy;
use regex::Regex;

use super::commonmark::fence_for;
use super::{Filter, Rule};
use crate::node::{Element, Node, NodeRef};
use crate::service::HtmlConverter;

static HIGHLIGHT_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"highlight-(?:text|source)-([a-z0-9]+)").expect("highlight class pattern is valid")
});

/// Apply all GFM rules to a converter.
///
/// ```rust
/// use markbridge::{gfm, HtmlConverter};
///
/// let mut converter = HtmlConverter::new();
/// converter.use_plugin(gfm);
/// let markdown = converter.convert("<p><del>gone</del></p>").unwrap();
/// assert_eq!(markdown, "~gone~");
/// ```
pub fn gfm(converter: &mut HtmlConverter) {
    highlighted_code_block(converter);
    strikethrough(converter);
    tables(converter);
    task_list_items(converter);
}

/// `<div class="highlight-text-LANG"><pre>…</pre></div>` as a fenced block
pub fn highlighted_code_block(converter: &mut HtmlConverter) {
    converter.add_rule(
        "highlighted_code_block",
        Rule::new(
            Filter::predicate(|tag, node, _| {
                tag == "div"
                    && highlight_language(node).is_some()
                    && matches!(node.first_child(), Some(Node::Element(e)) if e.tag == "pre")
            }),
            |node, _, options| {
                let language = highlight_language(node).unwrap_or_default();
                let code = node.first_child().map(Node::text_content).unwrap_or_default();
                let fence = fence_for(&code, &options.fence);
                format!("\n\n{fence}{language}\n{code}\n{fence}\n\n")
            },
        ),
    );
}

fn highlight_language<'a>(node: &NodeRef<'a>) -> Option<&'a str> {
    node.attr("class")
        .and_then(|class| HIGHLIGHT_CLASS.captures(class))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// `<del>`, `<s>` and `<strike>` with a single tilde
pub fn strikethrough(converter: &mut HtmlConverter) {
    converter.add_rule(
        "strikethrough",
        Rule::for_tags(&["del", "s", "strike"], |_, content, _| {
            format!("~{}~", content)
        }),
    );
}

/// Pipe tables. Tables whose first row is not a heading row stay HTML.
pub fn tables(converter: &mut HtmlConverter) {
    converter.add_rule(
        "table_cell",
        Rule::for_tags(&["th", "td"], |node, content, _| {
            cell(&content_for_cell(content), node.element_index() == 0)
        }),
    );

    converter.add_rule(
        "table_row",
        Rule::for_tag("tr", |node, content, _| {
            let parent = node.parent().map(|p| p.element);
            let grandparent = node.parent().and_then(|p| p.parent()).map(|g| g.element);

            let mut border_cells = String::new();
            if parent.is_some_and(|parent| is_heading_row(node.element, parent, grandparent)) {
                for (i, child) in node.element_children().enumerate() {
                    let align = child.attr("align").unwrap_or("").to_lowercase();
                    let border = match align.as_str() {
                        "left" => ":--",
                        "right" => "--:",
                        "center" => ":-:",
                        _ => "---",
                    };
                    border_cells.push_str(&cell(border, i == 0));
                }
            }

            if border_cells.is_empty() {
                format!("\n{}", content)
            } else {
                format!("\n{}\n{}", content, border_cells)
            }
        }),
    );

    converter.add_rule(
        "table",
        Rule::new(
            Filter::predicate(|tag, node, _| tag == "table" && first_row_is_heading(node.element)),
            |_, content, _| {
                // Separate header and body rows by a single newline
                format!("\n\n{}\n\n", content.replacen("\n\n", "\n", 1))
            },
        ),
    );

    converter.add_rule(
        "table_section",
        Rule::for_tags(&["thead", "tbody", "tfoot"], |_, content, _| content.to_string()),
    );

    converter.keep(Filter::predicate(|tag, node, _| {
        tag == "table" && !first_row_is_heading(node.element)
    }));
}

/// Checked and unchecked checkboxes at the start of list items
pub fn task_list_items(converter: &mut HtmlConverter) {
    converter.add_rule(
        "task_list_items",
        Rule::new(
            Filter::predicate(|tag, node, _| {
                tag == "input"
                    && node.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
                    && node.parent_tag() == Some("li")
            }),
            |node, _, _| {
                let marker = if node.has_attr("checked") { "[x]" } else { "[ ]" };
                match node.next_sibling() {
                    Some(Node::Text(text)) if text.starts_with(char::is_whitespace) => {
                        marker.to_string()
                    }
                    _ => format!("{} ", marker),
                }
            },
        ),
    );
}

fn cell(content: &str, first: bool) -> String {
    let prefix = if first { "| " } else { " " };
    format!("{}{} |", prefix, content)
}

/// Cells must stay on one line and must not end the cell early
fn content_for_cell(content: &str) -> String {
    content
        .trim()
        .replace('\n', " ")
        .replace('|', "\\|")
}

fn is_heading_row(tr: &Element, parent: &Element, grandparent: Option<&Element>) -> bool {
    if parent.tag == "thead" {
        return true;
    }

    let is_first_row = parent
        .first_element_child()
        .is_some_and(|first| std::ptr::eq(first, tr));

    is_first_row
        && (parent.tag == "table" || is_first_tbody(parent, grandparent))
        && tr.element_children().all(|cell| cell.tag == "th")
}

fn is_first_tbody(section: &Element, table: Option<&Element>) -> bool {
    if section.tag != "tbody" {
        return false;
    }

    let Some(table) = table else {
        return true;
    };

    let previous = table
        .element_children()
        .take_while(|child| !std::ptr::eq(*child, section))
        .last();

    match previous {
        None => true,
        Some(prev) => prev.tag == "thead" && prev.text_content().trim().is_empty(),
    }
}

fn first_row_is_heading(table: &Element) -> bool {
    for child in table.element_children() {
        match child.tag.as_str() {
            "tr" => return is_heading_row(child, table, None),
            "thead" | "tbody" | "tfoot" => {
                if let Some(tr) = child.element_children().find(|e| e.tag == "tr") {
                    return is_heading_row(tr, child, Some(table));
                }
            }
            _ => {}
        }
    }
    false
}
