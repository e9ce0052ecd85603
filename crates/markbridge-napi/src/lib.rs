#![deny(clippy::all)]

use napi::{JsString, JsUnknown, ValueType};
use napi_derive::napi;

use markbridge::{
    gfm, CodeBlockStyle, ConvertError, ConverterOptions, Filter, HeadingStyle,
    HtmlConverter as RustHtmlConverter, Input,
};

/// Classify a JavaScript value and hand it to `f` as an [`Input`]
fn with_input<T, F>(value: JsUnknown, f: F) -> napi::Result<T>
where
    F: FnOnce(Input<'_>) -> T,
{
    match value.get_type()? {
        ValueType::String => {
            let text = JsString::try_from(value)?.into_utf8()?;
            Ok(f(Input::Text(text.as_str()?)))
        }
        other => Ok(f(Input::Other(type_name(other)))),
    }
}

fn type_name(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::Undefined => "undefined",
        ValueType::Null => "null",
        ValueType::Boolean => "boolean",
        ValueType::Number => "number",
        ValueType::String => "string",
        ValueType::Symbol => "symbol",
        ValueType::Object => "object",
        ValueType::Function => "function",
        _ => "unknown",
    }
}

fn to_napi_error(err: ConvertError) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

/// Convert editor HTML to Markdown
#[napi]
pub fn html_to_markdown(html: JsUnknown) -> napi::Result<String> {
    with_input(html, |input| markbridge::html_to_markdown(input))?.map_err(to_napi_error)
}

/// Render Markdown to HTML
#[napi]
pub fn markdown_to_html(markdown: JsUnknown) -> napi::Result<String> {
    with_input(markdown, |input| markbridge::markdown_to_html(input))?.map_err(to_napi_error)
}

/// Check whether a value looks like Markdown source. Never throws.
#[napi]
pub fn detect_markdown(text: JsUnknown) -> bool {
    with_input(text, |input| markbridge::detect_markdown(input)).unwrap_or(false)
}

#[napi(object)]
pub struct Options {
    pub heading_style: Option<String>,
    pub hr: Option<String>,
    pub bullet_list_marker: Option<String>,
    pub code_block_style: Option<String>,
    pub fence: Option<String>,
    pub em_delimiter: Option<String>,
    pub strong_delimiter: Option<String>,
    pub br: Option<String>,
    /// Apply the GFM rules (tables, strikethrough, task lists); on by default
    pub gfm: Option<bool>,
}

impl From<&Options> for ConverterOptions {
    fn from(opts: &Options) -> Self {
        let mut result = ConverterOptions::default();

        if let Some(style) = &opts.heading_style {
            result.heading_style = match style.to_lowercase().as_str() {
                "atx" => HeadingStyle::Atx,
                _ => HeadingStyle::Setext,
            };
        }

        if let Some(hr) = &opts.hr {
            result.hr = hr.clone();
        }

        if let Some(c) = opts.bullet_list_marker.as_deref().and_then(|m| m.chars().next()) {
            result.bullet_list_marker = c;
        }

        if let Some(style) = &opts.code_block_style {
            result.code_block_style = match style.to_lowercase().as_str() {
                "fenced" => CodeBlockStyle::Fenced,
                _ => CodeBlockStyle::Indented,
            };
        }

        if let Some(fence) = &opts.fence {
            result.fence = fence.clone();
        }

        if let Some(c) = opts.em_delimiter.as_deref().and_then(|d| d.chars().next()) {
            result.em_delimiter = c;
        }

        if let Some(delim) = &opts.strong_delimiter {
            result.strong_delimiter = delim.clone();
        }

        if let Some(br) = &opts.br {
            result.br = br.clone();
        }

        result
    }
}

/// A configurable converter for callers that need other options than the
/// article defaults behind `htmlToMarkdown`
#[napi(js_name = "HtmlConverter")]
pub struct JsHtmlConverter {
    inner: RustHtmlConverter,
}

#[napi]
impl JsHtmlConverter {
    #[napi(constructor)]
    pub fn new(options: Option<Options>) -> Self {
        let mut inner = match &options {
            Some(opts) => RustHtmlConverter::with_options(opts.into()),
            None => RustHtmlConverter::new(),
        };
        if options.as_ref().and_then(|o| o.gfm).unwrap_or(true) {
            inner.use_plugin(gfm);
        }
        Self { inner }
    }

    /// Convert HTML to Markdown
    #[napi]
    pub fn convert(&self, html: String) -> napi::Result<String> {
        self.inner.convert(&html).map_err(to_napi_error)
    }

    /// Keep elements with these tags as HTML
    #[napi]
    pub fn keep(&mut self, tags: Vec<String>) {
        for tag in tags {
            self.inner.keep(Filter::tag(&tag));
        }
    }

    /// Drop elements with these tags and their content
    #[napi]
    pub fn remove(&mut self, tags: Vec<String>) {
        for tag in tags {
            self.inner.remove(Filter::tag(&tag));
        }
    }

    /// Escape markdown special characters
    #[napi]
    pub fn escape(&self, text: String) -> String {
        self.inner.escape(&text)
    }
}
