//! Error types for descriptor binding

use crate::validation::ValidationException;
use thiserror::Error;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reading or generating a descriptor failed for a reason other than model validation
///
/// Carries the original cause when one exists (XML syntax error, unknown
/// datatype, bad direction token, ...).
#[derive(Error, Debug)]
#[error("{message}")]
pub struct DescriptorBindingError {
    message: String,
    #[source]
    source: Option<BoxedCause>,
}

impl DescriptorBindingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by a descriptor binder
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// XML could not be read or written
    #[error(transparent)]
    Binding(#[from] DescriptorBindingError),

    /// The descriptor parsed but the model violates one or more rules
    ///
    /// Never wrapped into [`DescriptorError::Binding`], so callers can inspect
    /// the full error list.
    #[error(transparent)]
    Validation(#[from] ValidationException),
}

impl DescriptorError {
    /// The validation errors, if this failure came from model validation.
    pub fn validation_errors(&self) -> Option<&[crate::validation::ValidationError]> {
        match self {
            DescriptorError::Validation(exception) => Some(exception.errors()),
            DescriptorError::Binding(_) => None,
        }
    }
}

/// Result type alias for binder operations
pub type Result<T> = std::result::Result<T, DescriptorError>;
