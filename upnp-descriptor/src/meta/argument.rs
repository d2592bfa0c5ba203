use crate::validation::{Validate, ValidationError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use upnp_types::grammar;

const OWNER: &str = "ActionArgument";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown argument direction: '{0}'")]
pub struct UnknownDirection(pub String);

/// Whether an argument is sent by the control point or returned by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("in") {
            Ok(Direction::In)
        } else if s.eq_ignore_ascii_case("out") {
            Ok(Direction::Out)
        } else {
            Err(UnknownDirection(s.to_string()))
        }
    }
}

/// A named, directional parameter of an action.
///
/// The datatype is not stored here. It is resolved by name against the owning
/// service's state table, see [`crate::Service::related_state_variable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionArgument {
    name: String,
    related_state_variable_name: String,
    direction: Direction,
    is_return_value: bool,
}

impl ActionArgument {
    pub fn new(
        name: impl Into<String>,
        related_state_variable_name: impl Into<String>,
        direction: Direction,
        is_return_value: bool,
    ) -> Self {
        Self {
            name: name.into(),
            related_state_variable_name: related_state_variable_name.into(),
            direction,
            is_return_value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn related_state_variable_name(&self) -> &str {
        &self.related_state_variable_name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_return_value(&self) -> bool {
        self.is_return_value
    }
}

impl Validate for ActionArgument {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !grammar::is_valid_uda_name(&self.name) {
            errors.push(ValidationError::new(
                OWNER,
                "name",
                format!("Invalid argument name: '{}'", self.name),
            ));
        }

        if self.is_return_value && self.direction != Direction::Out {
            errors.push(ValidationError::new(
                OWNER,
                "direction",
                format!("Return value argument '{}' must be direction 'out'", self.name),
            ));
        }

        errors
    }
}
