//! Structural validation of the service model.
//!
//! Validators never fail on a rule violation. They return every violated rule
//! as a [`ValidationError`] and leave it to the caller to decide whether an
//! empty list is a precondition.

use serde::Serialize;
use std::fmt;

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The kind of model element that was checked, e.g. `ActionArgument`
    pub owner: &'static str,
    /// The offending field, e.g. `name` or `direction`
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(owner: &'static str, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            owner,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.owner, self.field, self.message)
    }
}

/// Something that can check its own structural rules.
pub trait Validate {
    fn validate(&self) -> Vec<ValidationError>;
}

/// Model construction was refused because validation produced errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationException {
    message: String,
    errors: Vec<ValidationError>,
}

impl ValidationException {
    pub fn new(message: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} error(s))", self.message, self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationException {}
