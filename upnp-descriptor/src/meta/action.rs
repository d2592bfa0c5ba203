use super::argument::{ActionArgument, Direction};
use crate::validation::{Validate, ValidationError};
use serde::Serialize;
use upnp_types::grammar;

/// A named operation of a service with its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    name: String,
    arguments: Vec<ActionArgument>,
}

impl Action {
    pub fn new(name: impl Into<String>, arguments: Vec<ActionArgument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[ActionArgument] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&ActionArgument> {
        self.arguments.iter().find(|argument| argument.name() == name)
    }

    pub fn input_arguments(&self) -> impl Iterator<Item = &ActionArgument> {
        self.arguments_in(Direction::In)
    }

    pub fn output_arguments(&self) -> impl Iterator<Item = &ActionArgument> {
        self.arguments_in(Direction::Out)
    }

    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    pub fn has_input_arguments(&self) -> bool {
        self.input_arguments().next().is_some()
    }

    pub fn has_output_arguments(&self) -> bool {
        self.output_arguments().next().is_some()
    }

    /// The output argument flagged as return value, if any.
    pub fn return_value(&self) -> Option<&ActionArgument> {
        self.arguments.iter().find(|argument| argument.is_return_value())
    }

    fn arguments_in(&self, direction: Direction) -> impl Iterator<Item = &ActionArgument> {
        self.arguments
            .iter()
            .filter(move |argument| argument.direction() == direction)
    }
}

impl Validate for Action {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !grammar::is_valid_uda_name(&self.name) {
            errors.push(ValidationError::new(
                "Action",
                "name",
                format!("Invalid action name: '{}'", self.name),
            ));
        }

        for argument in &self.arguments {
            errors.extend(argument.validate());
        }

        errors
    }
}
