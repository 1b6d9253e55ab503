use std::fmt;

use thiserror::Error;

/// Errors produced when parsing template source.
#[derive(Debug, Clone)]
pub struct TemplateError {
    message: String,
}

impl TemplateError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Parser diagnostic, without the `template error:` prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template error: {}", self.message)
    }
}

impl std::error::Error for TemplateError {}

/// Errors produced while rendering a parsed template against a context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no value for key '{key}'")]
    MissingKey { key: String },

    #[error(".Channel.BaseName is only available when rendering a duplicate group")]
    NoBaseName,

    #[error("cannot print a map; use index to pick a key")]
    MapNotPrintable,

    #[error("{func} expects {expected} argument(s), got {got}")]
    Arity {
        func: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{func} expects {expected}")]
    TypeMismatch {
        func: &'static str,
        expected: &'static str,
    },
}
