//! Mutable scratch model filled while reading a descriptor.
//!
//! The staged types mirror [`crate::meta`] one-to-one with public fields and
//! optional values. [`StagedService::build`] consumes the staging value, so a
//! staged argument ends up in exactly one frozen action and a partially built
//! service is never observable.

use crate::datatype::Datatype;
use crate::meta::{Action, ActionArgument, AllowedValueRange, Direction, Service, SpecVersion, StateVariable};
use crate::validation::{Validate, ValidationError, ValidationException};
use tracing::debug;
use upnp_types::ServiceType;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedService {
    pub spec_version: SpecVersion,
    pub actions: Vec<StagedAction>,
    pub state_variables: Vec<StagedStateVariable>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedAction {
    pub name: String,
    pub arguments: Vec<StagedArgument>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedArgument {
    pub name: String,
    pub related_state_variable: String,
    pub direction: Option<Direction>,
    pub is_return_value: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedStateVariable {
    pub name: String,
    pub datatype: Option<Datatype>,
    pub default_value: Option<String>,
    pub allowed_values: Vec<String>,
    pub allowed_value_range: Option<AllowedValueRange>,
    pub send_events: bool,
}

impl StagedService {
    /// Freeze the staged values into a [`Service`] of the given type.
    ///
    /// Every violated rule is reported at once. Arguments without a direction
    /// and variables without a datatype are reported and left out of the
    /// model.
    pub fn build(self, service_type: ServiceType) -> Result<Service, ValidationException> {
        let mut errors = Vec::new();

        let actions = self
            .actions
            .into_iter()
            .map(|action| action.build(&mut errors))
            .collect();

        let state_variables = self
            .state_variables
            .into_iter()
            .filter_map(|variable| variable.build(&mut errors))
            .collect();

        let service = Service::new(service_type, self.spec_version, actions, state_variables);
        errors.extend(service.validate());

        if errors.is_empty() {
            debug!(
                "Built service model {} with {} actions and {} state variables",
                service.service_type(),
                service.actions().len(),
                service.state_variables().len()
            );
            Ok(service)
        } else {
            debug!(
                "Service model {} failed validation with {} errors",
                service.service_type(),
                errors.len()
            );
            Err(ValidationException::new(
                format!("Validation of service model failed: {}", service.service_type()),
                errors,
            ))
        }
    }
}

impl StagedAction {
    fn build(self, errors: &mut Vec<ValidationError>) -> Action {
        let action_name = self.name;
        let arguments = self
            .arguments
            .into_iter()
            .filter_map(|argument| match argument.direction {
                Some(direction) => Some(ActionArgument::new(
                    argument.name,
                    argument.related_state_variable,
                    direction,
                    argument.is_return_value,
                )),
                None => {
                    errors.push(ValidationError::new(
                        "ActionArgument",
                        "direction",
                        format!("Argument '{}' of action '{}' has no direction", argument.name, action_name),
                    ));
                    None
                }
            })
            .collect();
        Action::new(action_name, arguments)
    }
}

impl StagedStateVariable {
    fn build(self, errors: &mut Vec<ValidationError>) -> Option<StateVariable> {
        let Some(datatype) = self.datatype else {
            errors.push(ValidationError::new(
                "StateVariable",
                "dataType",
                format!("State variable '{}' has no datatype", self.name),
            ));
            return None;
        };

        let mut variable = StateVariable::new(self.name, datatype)
            .with_allowed_values(self.allowed_values)
            .with_send_events(self.send_events);
        if let Some(default_value) = self.default_value {
            variable = variable.with_default_value(default_value);
        }
        if let Some(range) = self.allowed_value_range {
            variable = variable.with_allowed_value_range(range);
        }
        Some(variable)
    }
}
