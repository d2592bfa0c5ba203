use super::action::Action;
use super::argument::ActionArgument;
use super::state_variable::StateVariable;
use crate::datatype::Datatype;
use crate::validation::{Validate, ValidationError};
use serde::Serialize;
use upnp_types::ServiceType;

/// UDA version a descriptor was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecVersion {
    pub major: u32,
    pub minor: u32,
}

impl SpecVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for SpecVersion {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// The frozen description of one service: its actions and state table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    service_type: ServiceType,
    spec_version: SpecVersion,
    actions: Vec<Action>,
    state_variables: Vec<StateVariable>,
}

impl Service {
    pub fn new(
        service_type: ServiceType,
        spec_version: SpecVersion,
        actions: Vec<Action>,
        state_variables: Vec<StateVariable>,
    ) -> Self {
        Self {
            service_type,
            spec_version,
            actions,
            state_variables,
        }
    }

    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    pub fn spec_version(&self) -> SpecVersion {
        self.spec_version
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name() == name)
    }

    pub fn state_variables(&self) -> &[StateVariable] {
        &self.state_variables
    }

    pub fn state_variable(&self, name: &str) -> Option<&StateVariable> {
        self.state_variables.iter().find(|variable| variable.name() == name)
    }

    /// The variables whose changes are published to GENA subscribers.
    pub fn evented_state_variables(&self) -> impl Iterator<Item = &StateVariable> {
        self.state_variables.iter().filter(|variable| variable.send_events())
    }

    pub fn related_state_variable(&self, argument: &ActionArgument) -> Option<&StateVariable> {
        self.state_variable(argument.related_state_variable_name())
    }

    pub fn datatype_of(&self, argument: &ActionArgument) -> Option<Datatype> {
        self.related_state_variable(argument).map(StateVariable::datatype)
    }
}

impl Validate for Service {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for action in &self.actions {
            errors.extend(action.validate());
            for argument in action.arguments() {
                if self.related_state_variable(argument).is_none() {
                    errors.push(ValidationError::new(
                        "ActionArgument",
                        "relatedStateVariable",
                        format!(
                            "Argument '{}' of action '{}' references unknown state variable '{}'",
                            argument.name(),
                            action.name(),
                            argument.related_state_variable_name()
                        ),
                    ));
                }
            }
        }

        for variable in &self.state_variables {
            errors.extend(variable.validate());
        }

        errors
    }
}
