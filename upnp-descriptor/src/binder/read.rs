//! Descriptor XML to staged model.

use super::element::{ScpdElement, SEND_EVENTS_ATTRIBUTE};
use crate::datatype::Datatype;
use crate::error::{DescriptorBindingError, Result};
use crate::meta::{AllowedValueRange, Direction, Service, SpecVersion};
use crate::staging::{StagedAction, StagedArgument, StagedService, StagedStateVariable};
use tracing::{debug, trace};
use upnp_types::ServiceType;
use xmltree::{Element, XMLNode};

pub(crate) fn read_descriptor(service_type: ServiceType, descriptor: &str) -> Result<Service> {
    debug!("Reading service descriptor for {}", service_type);

    let root = Element::parse(descriptor.as_bytes()).map_err(|e| {
        DescriptorBindingError::with_source(
            format!("Could not parse service descriptor of {service_type}"),
            e,
        )
    })?;

    if !ScpdElement::Scpd.is(&root.name) {
        return Err(DescriptorBindingError::new(format!(
            "Root element name is not <{}>: {}",
            ScpdElement::Scpd.as_str(),
            root.name
        ))
        .into());
    }

    let staged = hydrate_service(&root)?;
    Ok(staged.build(service_type)?)
}

fn hydrate_service(root: &Element) -> Result<StagedService> {
    let mut staged = StagedService::default();

    for child in child_elements(root) {
        match ScpdElement::from_name(&child.name) {
            Some(ScpdElement::SpecVersion) => staged.spec_version = hydrate_spec_version(child)?,
            Some(ScpdElement::ActionList) => {
                for action in children_named(child, ScpdElement::Action) {
                    staged.actions.push(hydrate_action(action)?);
                }
            }
            Some(ScpdElement::ServiceStateTable) => {
                for variable in children_named(child, ScpdElement::StateVariable) {
                    staged.state_variables.push(hydrate_state_variable(variable)?);
                }
            }
            _ => skip(child),
        }
    }

    Ok(staged)
}

fn hydrate_spec_version(element: &Element) -> Result<SpecVersion> {
    let component = |name: ScpdElement| -> Result<u32> {
        let text = child_text(element, name).ok_or_else(|| {
            DescriptorBindingError::new(format!(
                "Missing <{}> in <{}>",
                name.as_str(),
                ScpdElement::SpecVersion.as_str()
            ))
        })?;
        let value = text.parse::<u32>().map_err(|e| {
            DescriptorBindingError::with_source(
                format!("Invalid <{}> in <{}>: '{}'", name.as_str(), ScpdElement::SpecVersion.as_str(), text),
                e,
            )
        })?;
        Ok(value)
    };

    Ok(SpecVersion::new(component(ScpdElement::Major)?, component(ScpdElement::Minor)?))
}

fn hydrate_action(element: &Element) -> Result<StagedAction> {
    let mut action = StagedAction::default();

    for child in child_elements(element) {
        match ScpdElement::from_name(&child.name) {
            Some(ScpdElement::Name) => action.name = text_of(child),
            Some(ScpdElement::ArgumentList) => {
                for argument in children_named(child, ScpdElement::Argument) {
                    action.arguments.push(hydrate_argument(argument, &action.name)?);
                }
            }
            _ => skip(child),
        }
    }

    Ok(action)
}

fn hydrate_argument(element: &Element, action_name: &str) -> Result<StagedArgument> {
    let mut argument = StagedArgument::default();
    let mut direction = None;

    for child in child_elements(element) {
        match ScpdElement::from_name(&child.name) {
            Some(ScpdElement::Name) => argument.name = text_of(child),
            Some(ScpdElement::Direction) => direction = Some(text_of(child)),
            Some(ScpdElement::RelatedStateVariable) => argument.related_state_variable = text_of(child),
            Some(ScpdElement::Retval) => argument.is_return_value = true,
            _ => skip(child),
        }
    }

    if let Some(token) = direction {
        let parsed = token.parse::<Direction>().map_err(|e| {
            DescriptorBindingError::with_source(
                format!("Invalid direction of argument '{}' in action '{}'", argument.name, action_name),
                e,
            )
        })?;
        argument.direction = Some(parsed);
    }

    Ok(argument)
}

fn hydrate_state_variable(element: &Element) -> Result<StagedStateVariable> {
    let mut variable = StagedStateVariable {
        send_events: send_events(element),
        ..Default::default()
    };
    let mut datatype = None;

    for child in child_elements(element) {
        match ScpdElement::from_name(&child.name) {
            Some(ScpdElement::Name) => variable.name = text_of(child),
            Some(ScpdElement::DataType) => datatype = Some(text_of(child)),
            Some(ScpdElement::DefaultValue) => variable.default_value = Some(raw_text_of(child)),
            Some(ScpdElement::AllowedValueList) => {
                variable.allowed_values = children_named(child, ScpdElement::AllowedValue)
                    .map(raw_text_of)
                    .collect();
            }
            Some(ScpdElement::AllowedValueRange) => {
                variable.allowed_value_range = Some(hydrate_allowed_value_range(child));
            }
            _ => skip(child),
        }
    }

    if let Some(name) = datatype {
        let parsed = Datatype::from_descriptor_name(&name).map_err(|e| {
            DescriptorBindingError::with_source(
                format!("Could not read datatype of state variable '{}'", variable.name),
                e,
            )
        })?;
        variable.datatype = Some(parsed);
    }

    Ok(variable)
}

/// Absent or unparsable bounds fall back to `0`, `i64::MAX` and `1`.
fn hydrate_allowed_value_range(element: &Element) -> AllowedValueRange {
    let bound = |name: ScpdElement, fallback: i64| {
        child_text(element, name)
            .and_then(|text| text.parse::<i64>().ok())
            .unwrap_or(fallback)
    };
    let defaults = AllowedValueRange::default();

    AllowedValueRange::new(
        bound(ScpdElement::Minimum, defaults.minimum),
        bound(ScpdElement::Maximum, defaults.maximum),
        bound(ScpdElement::Step, defaults.step),
    )
}

/// Only an explicit `yes` makes a variable evented.
fn send_events(element: &Element) -> bool {
    element
        .attributes
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(SEND_EVENTS_ATTRIBUTE))
        .map(|(_, value)| value.trim().eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

fn skip(element: &Element) {
    trace!("Ignoring unknown element: {}", element.name);
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

fn children_named(element: &Element, name: ScpdElement) -> impl Iterator<Item = &Element> {
    child_elements(element).filter(move |child| name.is(&child.name))
}

fn child_text(element: &Element, name: ScpdElement) -> Option<String> {
    children_named(element, name).next().map(text_of)
}

/// Trimmed content of a structural token (names, directions, datatypes, numbers).
fn text_of(element: &Element) -> String {
    raw_text_of(element).trim().to_string()
}

/// Concatenated text and CDATA content as written. Values keep their spaces.
fn raw_text_of(element: &Element) -> String {
    let mut text = String::new();
    for node in &element.children {
        match node {
            XMLNode::Text(value) | XMLNode::CData(value) => text.push_str(value),
            _ => {}
        }
    }
    text
}
