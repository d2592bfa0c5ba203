use crate::datatype::Datatype;
use crate::validation::{Validate, ValidationError};
use serde::Serialize;
use upnp_types::grammar;

const OWNER: &str = "StateVariable";

/// Inclusive numeric bounds of a state variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllowedValueRange {
    pub minimum: i64,
    pub maximum: i64,
    pub step: i64,
}

impl AllowedValueRange {
    pub fn new(minimum: i64, maximum: i64, step: i64) -> Self {
        Self {
            minimum,
            maximum,
            step,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.minimum <= value && value <= self.maximum
    }
}

impl Default for AllowedValueRange {
    fn default() -> Self {
        Self::new(0, i64::MAX, 1)
    }
}

/// A named, typed value of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateVariable {
    name: String,
    datatype: Datatype,
    default_value: Option<String>,
    allowed_values: Option<Vec<String>>,
    allowed_value_range: Option<AllowedValueRange>,
    send_events: bool,
}

impl StateVariable {
    /// A plain variable without constraints that is not evented.
    pub fn new(name: impl Into<String>, datatype: Datatype) -> Self {
        Self {
            name: name.into(),
            datatype,
            default_value: None,
            allowed_values: None,
            allowed_value_range: None,
            send_events: false,
        }
    }

    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// An empty list is no constraint at all.
    pub fn with_allowed_values(mut self, allowed_values: Vec<String>) -> Self {
        self.allowed_values = (!allowed_values.is_empty()).then_some(allowed_values);
        self
    }

    pub fn with_allowed_value_range(mut self, range: AllowedValueRange) -> Self {
        self.allowed_value_range = Some(range);
        self
    }

    pub fn with_send_events(mut self, send_events: bool) -> Self {
        self.send_events = send_events;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn allowed_values(&self) -> Option<&[String]> {
        self.allowed_values.as_deref()
    }

    pub fn allowed_value_range(&self) -> Option<&AllowedValueRange> {
        self.allowed_value_range.as_ref()
    }

    pub fn send_events(&self) -> bool {
        self.send_events
    }

    /// Whether `value` is lexically valid and satisfies every constraint.
    pub fn accepts(&self, value: &str) -> bool {
        if !self.datatype.is_valid_value(value) {
            return false;
        }

        if let Some(allowed) = &self.allowed_values {
            if !allowed.iter().any(|candidate| candidate == value) {
                return false;
            }
        }

        match &self.allowed_value_range {
            Some(range) => match value.parse::<i64>() {
                Ok(number) => range.contains(number),
                Err(_) => value
                    .parse::<f64>()
                    .map(|number| range.minimum as f64 <= number && number <= range.maximum as f64)
                    .unwrap_or(false),
            },
            None => true,
        }
    }
}

impl Validate for StateVariable {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !grammar::is_valid_uda_name(&self.name) {
            errors.push(ValidationError::new(
                OWNER,
                "name",
                format!("Invalid state variable name: '{}'", self.name),
            ));
        }

        if self.allowed_values.is_some() && self.datatype != Datatype::String {
            errors.push(ValidationError::new(
                OWNER,
                "allowedValues",
                format!(
                    "Allowed value list of '{}' requires datatype 'string', found '{}'",
                    self.name, self.datatype
                ),
            ));
        }

        if let Some(range) = &self.allowed_value_range {
            if !self.datatype.is_numeric() {
                errors.push(ValidationError::new(
                    OWNER,
                    "allowedValueRange",
                    format!(
                        "Allowed value range of '{}' requires a numeric datatype, found '{}'",
                        self.name, self.datatype
                    ),
                ));
            }
            if range.minimum > range.maximum {
                errors.push(ValidationError::new(
                    OWNER,
                    "allowedValueRange",
                    format!(
                        "Minimum {} of '{}' is greater than maximum {}",
                        range.minimum, self.name, range.maximum
                    ),
                ));
            }
            // Written only when above 1
            if range.step < 1 {
                errors.push(ValidationError::new(
                    OWNER,
                    "allowedValueRange",
                    format!("Step {} of '{}' must be at least 1", range.step, self.name),
                ));
            }
        }

        errors
    }
}
