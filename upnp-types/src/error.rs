//! Error types for identifier parsing and construction.

use thiserror::Error;

/// Errors raised while parsing or constructing UPnP identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The input string does not match the grammar of the identifier
    ///
    /// `kind` names the identifier that was expected (e.g. "device type") and
    /// `input` is the raw offending text.
    #[error("Can't parse {kind} string: {input}")]
    MalformedIdentifier {
        /// Identifier kind that failed to parse
        kind: &'static str,
        /// The raw input
        input: String,
    },

    /// A single component handed to a constructor is not legal
    #[error("Illegal {component}: '{value}'")]
    InvalidComponent {
        /// Which component was rejected (namespace, type, version, name...)
        component: &'static str,
        /// The rejected value
        value: String,
    },
}

impl TypeError {
    pub(crate) fn malformed(kind: &'static str, input: &str) -> Self {
        Self::MalformedIdentifier {
            kind,
            input: input.to_string(),
        }
    }

    pub(crate) fn invalid(component: &'static str, value: impl ToString) -> Self {
        Self::InvalidComponent {
            component,
            value: value.to_string(),
        }
    }

    /// The raw text that caused the error.
    pub fn offending_input(&self) -> &str {
        match self {
            TypeError::MalformedIdentifier { input, .. } => input,
            TypeError::InvalidComponent { value, .. } => value,
        }
    }
}

/// Convenience Result type alias for identifier operations.
pub type Result<T> = std::result::Result<T, TypeError>;
