use markbridge::{html_to_markdown, ConvertError, Input};
use pretty_assertions::assert_eq;

fn convert(html: &str) -> String {
    html_to_markdown(html).unwrap()
}

#[test]
fn headings_are_atx() {
    assert_eq!(convert("<h1>Hello World</h1>"), "# Hello World");
    assert_eq!(convert("<h2>Subtitle</h2>"), "## Subtitle");
    assert_eq!(convert("<h3>Section</h3>"), "### Section");
    assert_eq!(convert("<h4>Subsection</h4>"), "#### Subsection");
    assert_eq!(convert("<h5>Minor heading</h5>"), "##### Minor heading");
    assert_eq!(convert("<h6>Smallest heading</h6>"), "###### Smallest heading");
}

#[test]
fn heading_with_bold_paragraph() {
    let markdown = convert("<h1>Hello World</h1><p>This is <strong>bold</strong>.</p>");
    assert!(markdown.contains("# Hello World"));
    assert!(markdown.contains("**bold**"));
    assert!(!markdown.contains("<h1>"));
    assert!(!markdown.contains("<strong>"));
}

#[test]
fn inline_formatting() {
    assert_eq!(convert("<p>This is <strong>bold</strong> text</p>"), "This is **bold** text");
    assert_eq!(convert("<p>This is <b>bold</b> text</p>"), "This is **bold** text");
    assert_eq!(convert("<p>This is <em>italic</em> text</p>"), "This is *italic* text");
    assert_eq!(convert("<p>This is <i>italic</i> text</p>"), "This is *italic* text");
    assert_eq!(
        convert("<p>Use <code>console.log()</code> to debug</p>"),
        "Use `console.log()` to debug"
    );
}

#[test]
fn strikethrough_uses_double_tilde() {
    assert_eq!(
        convert("<p>This is <strike>strikethrough</strike> text</p>"),
        "This is ~~strikethrough~~ text"
    );
    assert_eq!(convert("<p><s>gone</s></p>"), "~~gone~~");
    assert_eq!(convert("<p><del>gone</del></p>"), "~~gone~~");
}

#[test]
fn unordered_list() {
    assert_eq!(
        convert("<ul><li>Item 1</li><li>Item 2</li><li>Item 3</li></ul>"),
        "- Item 1\n- Item 2\n- Item 3"
    );
}

#[test]
fn ordered_list_keeps_two_spaces() {
    assert_eq!(
        convert("<ol><li>First</li><li>Second</li><li>Third</li></ol>"),
        "1.  First\n2.  Second\n3.  Third"
    );
}

#[test]
fn nested_list_uses_two_space_indent() {
    assert_eq!(
        convert("<ul><li>Item 1<ul><li>Nested 1</li><li>Nested 2</li></ul></li><li>Item 2</li></ul>"),
        "- Item 1\n  - Nested 1\n  - Nested 2\n- Item 2"
    );
}

#[test]
fn loose_list() {
    assert_eq!(
        convert("<ul><li><p>First</p></li><li><p>Second</p></li></ul>"),
        "- First\n\n- Second"
    );
}

#[test]
fn task_list() {
    assert_eq!(
        convert(r#"<ul><li><input type="checkbox" checked disabled> Done</li><li><input type="checkbox" disabled> Todo</li></ul>"#),
        "- [x] Done\n- [ ] Todo"
    );
}

#[test]
fn links_and_images() {
    assert_eq!(
        convert(r#"<a href="https://example.com">Example Link</a>"#),
        "[Example Link](https://example.com)"
    );
    assert_eq!(
        convert(r#"<img src="https://example.com/image.png" alt="Example Image">"#),
        "![Example Image](https://example.com/image.png)"
    );
    assert_eq!(convert(r#"<img src="a.png">"#), "![](a.png)");
    assert_eq!(convert("<a>No href link</a>"), "No href link");
}

#[test]
fn fenced_code_blocks() {
    assert_eq!(
        convert("<pre><code>const x = 1;\nconsole.log(x);</code></pre>"),
        "```\nconst x = 1;\nconsole.log(x);\n```"
    );
    assert_eq!(
        convert(r#"<pre><code class="language-javascript">const x = 1;</code></pre>"#),
        "```javascript\nconst x = 1;\n```"
    );
}

#[test]
fn blockquotes() {
    assert_eq!(
        convert("<blockquote><p>This is a quote</p></blockquote>"),
        "> This is a quote"
    );
    assert_eq!(
        convert("<blockquote><p>Line 1</p><p>Line 2</p></blockquote>"),
        "> Line 1\n> \n> Line 2"
    );
}

#[test]
fn horizontal_rule() {
    assert_eq!(convert("<p>Before</p><hr><p>After</p>"), "Before\n\n* * *\n\nAfter");
}

#[test]
fn table_with_header() {
    let html = "
      <table>
        <thead>
          <tr>
            <th>Header 1</th>
            <th>Header 2</th>
          </tr>
        </thead>
        <tbody>
          <tr>
            <td>Cell 1</td>
            <td>Cell 2</td>
          </tr>
        </tbody>
      </table>
    ";
    assert_eq!(
        convert(html),
        "| Header 1 | Header 2 |\n| --- | --- |\n| Cell 1 | Cell 2 |"
    );
}

#[test]
fn table_without_header_stays_html() {
    let markdown = convert("<table><tr><td>a</td><td>b</td></tr></table>");
    assert!(markdown.starts_with("<table>"));
    assert!(markdown.ends_with("</table>"));
}

#[test]
fn complex_document() {
    let html = r#"
      <h1>Article Title</h1>
      <p>This is a <strong>bold</strong> and <em>italic</em> paragraph.</p>
      <ul>
        <li>Item 1</li>
        <li>Item 2</li>
      </ul>
      <p>Check out <a href="https://example.com">this link</a>.</p>
    "#;
    assert_eq!(
        convert(html),
        "# Article Title\n\n\
         This is a **bold** and *italic* paragraph.\n\n\
         - Item 1\n- Item 2\n\n\
         Check out [this link](https://example.com)."
    );
}

#[test]
fn scripts_and_styles_are_dropped() {
    assert_eq!(
        convert("<style>p { color: red }</style><p>Body</p><script>alert(1)</script>"),
        "Body"
    );
}

#[test]
fn text_is_escaped() {
    assert_eq!(convert("<p>Price is 5 * 3 [approx]</p>"), "Price is 5 \\* 3 \\[approx\\]");
    assert_eq!(convert("<p># not a heading</p>"), "\\# not a heading");
}

#[test]
fn edge_cases() {
    assert_eq!(convert(""), "");
    assert_eq!(convert("Plain text"), "Plain text");
    assert_eq!(convert("   \n  \t  "), "");
    assert_eq!(convert("<p>unclosed <b>bold"), "unclosed **bold**");
}

#[test]
fn deep_nesting_is_an_error_not_a_crash() {
    let html = format!("{}x", "<div>".repeat(1000));
    let err = html_to_markdown(html.as_str()).unwrap_err();
    assert!(matches!(err, ConvertError::Conversion { .. }));
    assert!(err.to_string().starts_with("Failed to convert HTML to Markdown: nesting too deep"));

    let html = format!("{}x", "<blockquote>".repeat(1000));
    assert!(html_to_markdown(html.as_str()).is_err());
}

#[test]
fn non_text_input_is_rejected() {
    for kind in ["null", "undefined", "number"] {
        let err = html_to_markdown(Input::Other(kind)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInput(_)));
        assert!(err.to_string().starts_with("Input must be a string"));
    }
    assert!(html_to_markdown(None::<&str>).is_err());
}
