//! Error type shared by both conversion directions.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Which way a conversion was going when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HtmlToMarkdown,
    MarkdownToHtml,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::HtmlToMarkdown => f.write_str("HTML to Markdown"),
            Direction::MarkdownToHtml => f.write_str("Markdown to HTML"),
        }
    }
}

/// Error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The caller handed in something other than text
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to convert {direction}: {message}")]
    Conversion { direction: Direction, message: String },
}

impl ConvertError {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            ConvertError::InvalidInput(_) => None,
            ConvertError::Conversion { direction, .. } => Some(*direction),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Run a conversion, turning a panic anywhere inside it into
/// [`ConvertError::Conversion`].
pub(crate) fn guard<F>(direction: Direction, input_len: usize, convert: F) -> Result<String>
where
    F: FnOnce() -> String,
{
    match panic::catch_unwind(AssertUnwindSafe(convert)) {
        Ok(output) => {
            tracing::debug!(
                %direction,
                input_len,
                output_len = output.len(),
                "Conversion completed"
            );
            Ok(output)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%direction, error = %message, "Conversion failed");
            Err(ConvertError::Conversion { direction, message })
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_message_names_direction() {
        let err = ConvertError::Conversion {
            direction: Direction::MarkdownToHtml,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to convert Markdown to HTML: boom");
        assert_eq!(err.direction(), Some(Direction::MarkdownToHtml));
    }

    #[test]
    fn test_guard_passes_output_through() {
        let output = guard(Direction::HtmlToMarkdown, 3, || "abc".to_string()).unwrap();
        assert_eq!(output, "abc");
    }

    #[test]
    fn test_guard_catches_panics() {
        let err = guard(Direction::HtmlToMarkdown, 0, || panic!("bad {}", "node")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to convert HTML to Markdown: bad node");

        let err = guard(Direction::MarkdownToHtml, 0, || std::panic::panic_any(42_u8)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to convert Markdown to HTML: Unknown error");
    }
}
