//! Input values from dynamically typed callers.

use crate::error::{ConvertError, Result};

/// A value handed in by a caller that may not have checked its type.
///
/// Rust callers pass `&str`; bindings classify foreign values and pass
/// [`Input::Other`] with the name of the type they got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Text(&'a str),
    /// Anything that is not a string, e.g. `"number"` or `"null"`
    Other(&'static str),
}

impl<'a> Input<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Input::Text(text) => Some(text),
            Input::Other(_) => None,
        }
    }

    /// The text, or [`ConvertError::InvalidInput`] for anything else
    pub fn require_text(self) -> Result<&'a str> {
        match self {
            Input::Text(text) => Ok(text),
            Input::Other(kind) => Err(ConvertError::InvalidInput(format!(
                "Input must be a string, got {}",
                kind
            ))),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<Option<&'a str>> for Input<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(Input::Other("null"), Input::Text)
    }
}
