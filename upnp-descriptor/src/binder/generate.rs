//! Service model to descriptor XML.
//!
//! Output is always fully explicit: `sendEvents` is written on every state
//! variable and the state table is written even when empty.

use super::element::{ScpdElement, SEND_EVENTS_ATTRIBUTE, SERVICE_NAMESPACE};
use super::GenerateOptions;
use crate::error::{DescriptorBindingError, Result};
use crate::meta::{Action, ActionArgument, AllowedValueRange, Service, StateVariable};
use tracing::debug;
use xmltree::{Element, EmitterConfig, XMLNode};

pub(crate) fn generate_descriptor(service: &Service, options: &GenerateOptions) -> Result<String> {
    debug!("Generating service descriptor for {}", service.service_type());

    let root = build_scpd(service);

    let config = EmitterConfig::new()
        .perform_indent(options.pretty)
        .indent_string(options.indent.clone())
        .write_document_declaration(options.xml_declaration);

    let mut buffer = Vec::new();
    root.write_with_config(&mut buffer, config).map_err(|e| {
        DescriptorBindingError::with_source(
            format!("Could not generate service descriptor of {}", service.service_type()),
            e,
        )
    })?;

    let xml = String::from_utf8(buffer).map_err(|e| {
        DescriptorBindingError::with_source("Generated descriptor is not valid UTF-8", e)
    })?;
    Ok(xml)
}

fn build_scpd(service: &Service) -> Element {
    let mut root = Element::new(ScpdElement::Scpd.as_str());
    root.attributes
        .insert("xmlns".to_string(), SERVICE_NAMESPACE.to_string());

    let version = service.spec_version();
    let mut spec_version = Element::new(ScpdElement::SpecVersion.as_str());
    push_text(&mut spec_version, ScpdElement::Major, version.major.to_string());
    push_text(&mut spec_version, ScpdElement::Minor, version.minor.to_string());
    root.children.push(XMLNode::Element(spec_version));

    if service.has_actions() {
        let mut action_list = Element::new(ScpdElement::ActionList.as_str());
        for action in service.actions() {
            action_list.children.push(XMLNode::Element(build_action(action)));
        }
        root.children.push(XMLNode::Element(action_list));
    }

    let mut state_table = Element::new(ScpdElement::ServiceStateTable.as_str());
    for variable in service.state_variables() {
        state_table
            .children
            .push(XMLNode::Element(build_state_variable(variable)));
    }
    root.children.push(XMLNode::Element(state_table));

    root
}

fn build_action(action: &Action) -> Element {
    let mut element = Element::new(ScpdElement::Action.as_str());
    push_text(&mut element, ScpdElement::Name, action.name());

    if action.has_arguments() {
        let mut argument_list = Element::new(ScpdElement::ArgumentList.as_str());
        for argument in action.arguments() {
            argument_list
                .children
                .push(XMLNode::Element(build_argument(argument)));
        }
        element.children.push(XMLNode::Element(argument_list));
    }

    element
}

fn build_argument(argument: &ActionArgument) -> Element {
    let mut element = Element::new(ScpdElement::Argument.as_str());
    push_text(&mut element, ScpdElement::Name, argument.name());
    push_text(&mut element, ScpdElement::Direction, argument.direction().as_str());
    if argument.is_return_value() {
        element
            .children
            .push(XMLNode::Element(Element::new(ScpdElement::Retval.as_str())));
    }
    push_text(
        &mut element,
        ScpdElement::RelatedStateVariable,
        argument.related_state_variable_name(),
    );
    element
}

fn build_state_variable(variable: &StateVariable) -> Element {
    let mut element = Element::new(ScpdElement::StateVariable.as_str());
    element.attributes.insert(
        SEND_EVENTS_ATTRIBUTE.to_string(),
        if variable.send_events() { "yes" } else { "no" }.to_string(),
    );

    push_text(&mut element, ScpdElement::Name, variable.name());
    push_text(&mut element, ScpdElement::DataType, variable.datatype().descriptor_name());

    if let Some(default_value) = variable.default_value() {
        push_text(&mut element, ScpdElement::DefaultValue, default_value);
    }

    if let Some(allowed_values) = variable.allowed_values() {
        let mut list = Element::new(ScpdElement::AllowedValueList.as_str());
        for value in allowed_values {
            push_text(&mut list, ScpdElement::AllowedValue, value.as_str());
        }
        element.children.push(XMLNode::Element(list));
    }

    if let Some(range) = variable.allowed_value_range() {
        element
            .children
            .push(XMLNode::Element(build_allowed_value_range(range)));
    }

    element
}

fn build_allowed_value_range(range: &AllowedValueRange) -> Element {
    let mut element = Element::new(ScpdElement::AllowedValueRange.as_str());
    push_text(&mut element, ScpdElement::Minimum, range.minimum.to_string());
    push_text(&mut element, ScpdElement::Maximum, range.maximum.to_string());
    // 1 is implied when absent
    if range.step > 1 {
        push_text(&mut element, ScpdElement::Step, range.step.to_string());
    }
    element
}

fn push_text(parent: &mut Element, name: ScpdElement, text: impl Into<String>) {
    let mut child = Element::new(name.as_str());
    child.children.push(XMLNode::Text(text.into()));
    parent.children.push(XMLNode::Element(child));
}
