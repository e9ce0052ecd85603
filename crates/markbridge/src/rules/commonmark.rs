//! CommonMark rules for HTML to Markdown conversion.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Filter, Rule};
use crate::node::{Element, Node, NodeRef};
use crate::service::{CodeBlockStyle, HeadingStyle};
use crate::utilities::clean_attribute;

static LANGUAGE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"language-(\S+)").expect("language class pattern is valid"));

/// Create all CommonMark rules, keyed by name
pub fn commonmark_rules() -> Vec<(&'static str, Rule)> {
    vec![
        ("paragraph", paragraph_rule()),
        ("line_break", line_break_rule()),
        ("heading", heading_rule()),
        ("blockquote", blockquote_rule()),
        ("list", list_rule()),
        ("list_item", list_item_rule()),
        ("indented_code_block", indented_code_block_rule()),
        ("fenced_code_block", fenced_code_block_rule()),
        ("horizontal_rule", horizontal_rule()),
        ("inline_link", inline_link_rule()),
        ("emphasis", emphasis_rule()),
        ("strong", strong_rule()),
        ("code", code_rule()),
        ("image", image_rule()),
    ]
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("p", |_, content, _| format!("\n\n{}\n\n", content.trim()))
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, options| format!("{}\n", options.br))
}

/// Heading level from a tag name like `h3`
pub(crate) fn heading_level(tag: &str) -> usize {
    tag.get(1..).and_then(|n| n.parse().ok()).unwrap_or(1)
}

fn heading_rule() -> Rule {
    Rule::new(
        Filter::tags(&["h1", "h2", "h3", "h4", "h5", "h6"]),
        |node, content, options| {
            let level = heading_level(node.tag_name());

            match options.heading_style {
                HeadingStyle::Setext if level <= 2 => {
                    let underline = if level == 1 { "=" } else { "-" };
                    format!(
                        "\n\n{}\n{}\n\n",
                        content,
                        underline.repeat(content.chars().count())
                    )
                }
                _ => format!("\n\n{} {}\n\n", "#".repeat(level), content),
            }
        },
    )
}

fn blockquote_rule() -> Rule {
    Rule::for_tag("blockquote", |_, content, _| {
        let quoted: Vec<String> = content
            .trim_matches('\n')
            .lines()
            .map(|line| format!("> {}", line))
            .collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    })
}

fn list_rule() -> Rule {
    Rule::new(Filter::tags(&["ul", "ol"]), |node, content, _| {
        // A list closing its parent item hangs directly under the item text
        if node.parent_tag() == Some("li") && node.is_last_element_child() {
            format!("\n{}", content)
        } else {
            format!("\n\n{}\n\n", content)
        }
    })
}

fn list_item_rule() -> Rule {
    Rule::for_tag("li", |node, content, options| {
        let prefix = match node.parent() {
            Some(parent) if parent.tag_name() == "ol" => {
                let index = node.element_index() as i64;
                let number = parent
                    .attr("start")
                    .and_then(|start| start.trim().parse::<i64>().ok())
                    .map_or(index + 1, |start| start + index);
                format!("{}.  ", number)
            }
            _ => format!("{}   ", options.bullet_list_marker),
        };

        let body = content.trim_start_matches('\n');
        let trimmed = body.trim_end_matches('\n');
        // Items holding block content end in newlines and form a loose list
        let loose = trimmed.len() < body.len();

        let indent = " ".repeat(prefix.len());
        let indented = trimmed
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                if i == 0 || line.is_empty() {
                    line.to_string()
                } else {
                    format!("{}{}", indent, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        let tail = match (node.next_element_sibling().is_some(), loose) {
            (true, true) => "\n\n",
            (true, false) => "\n",
            (false, _) => "",
        };

        format!("{}{}{}", prefix, indented, tail)
    })
}

/// The `<code>` child of a `<pre>` when it is the first child
fn code_child<'a>(node: &NodeRef<'a>) -> Option<&'a Element> {
    node.first_child()
        .and_then(Node::as_element)
        .filter(|child| child.tag == "code")
}

fn indented_code_block_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, options| {
            tag == "pre"
                && code_child(node).is_some()
                && options.code_block_style == CodeBlockStyle::Indented
        }),
        |node, _, _| {
            let code = code_child(node).map(Element::text_content).unwrap_or_default();
            format!("\n\n    {}\n\n", code.replace('\n', "\n    "))
        },
    )
}

/// Language hint from a `language-*` class
pub(crate) fn code_language(code: &Element) -> &str {
    code.attr("class")
        .and_then(|class| LANGUAGE_CLASS.captures(class))
        .and_then(|captures| captures.get(1))
        .map_or("", |m| m.as_str())
}

/// A fence long enough not to be closed by any fence inside `code`
pub(crate) fn fence_for(code: &str, fence: &str) -> String {
    let fence_char = fence.chars().next().unwrap_or('`');
    let mut size = 3;

    for line in code.lines() {
        let run = line.chars().take_while(|&c| c == fence_char).count();
        if run >= size {
            size = run + 1;
        }
    }

    fence_char.to_string().repeat(size)
}

fn fenced_code_block_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, options| {
            tag == "pre"
                && code_child(node).is_some()
                && options.code_block_style == CodeBlockStyle::Fenced
        }),
        |node, _, options| {
            let Some(code_node) = code_child(node) else {
                return String::new();
            };

            let code = code_node.text_content();
            let language = code_language(code_node);
            let fence = fence_for(&code, &options.fence);

            format!(
                "\n\n{}{}\n{}\n{}\n\n",
                fence,
                language,
                code.strip_suffix('\n').unwrap_or(&code),
                fence
            )
        },
    )
}

fn horizontal_rule() -> Rule {
    Rule::for_tag("hr", |_, _, options| format!("\n\n{}\n\n", options.hr))
}

fn inline_link_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, _| {
            tag == "a" && !clean_attribute(node.attr("href")).is_empty()
        }),
        |node, content, _| {
            let href = clean_attribute(node.attr("href"))
                .replace('(', "\\(")
                .replace(')', "\\)");
            let title = clean_attribute(node.attr("title"));
            let title_part = if title.is_empty() {
                String::new()
            } else {
                format!(" \"{}\"", title.replace('"', "\\\""))
            };

            format!("[{}]({}{})", content, href, title_part)
        },
    )
}

fn emphasis_rule() -> Rule {
    Rule::new(Filter::tags(&["em", "i"]), |_, content, options| {
        if content.trim().is_empty() {
            return String::new();
        }
        let delimiter = options.em_delimiter;
        format!("{}{}{}", delimiter, content, delimiter)
    })
}

fn strong_rule() -> Rule {
    Rule::new(Filter::tags(&["strong", "b"]), |_, content, options| {
        if content.trim().is_empty() {
            return String::new();
        }
        let delimiter = &options.strong_delimiter;
        format!("{}{}{}", delimiter, content, delimiter)
    })
}

fn code_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, _| {
            // A lone <code> inside <pre> is a code block, not inline code
            let has_siblings = node.previous_sibling().is_some() || node.next_sibling().is_some();
            let is_code_block = node.parent_tag() == Some("pre") && !has_siblings;
            tag == "code" && !is_code_block
        }),
        |_, content, _| {
            if content.is_empty() {
                return String::new();
            }

            let content = content.replace("\r\n", " ").replace(['\r', '\n'], " ");

            let padded = content.starts_with(' ') && content.ends_with(' ') && content.trim() != "";
            let extra_space = if content.starts_with('`') || content.ends_with('`') || padded {
                " "
            } else {
                ""
            };

            // Use a delimiter length that no backtick run inside the code has
            let runs: Vec<usize> = content
                .split(|c| c != '`')
                .map(str::len)
                .filter(|&len| len > 0)
                .collect();
            let mut ticks = 1;
            while runs.contains(&ticks) {
                ticks += 1;
            }
            let delimiter = "`".repeat(ticks);

            format!("{}{}{}{}{}", delimiter, extra_space, content, extra_space, delimiter)
        },
    )
}

fn image_rule() -> Rule {
    Rule::for_tag("img", |node, _, _| {
        let alt = clean_attribute(node.attr("alt"));
        let src = clean_attribute(node.attr("src"));
        let title = clean_attribute(node.attr("title"));

        if src.is_empty() {
            return String::new();
        }

        let title_part = if title.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", title)
        };

        format!("![{}]({}{})", alt, src, title_part)
    })
}
