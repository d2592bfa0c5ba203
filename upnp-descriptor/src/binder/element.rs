//! Element and attribute names of the UDA 1.0 service descriptor schema.

/// Namespace of the `<scpd>` root element.
pub const SERVICE_NAMESPACE: &str = "urn:schemas-upnp-org:service-1-0";

/// Attribute of `<stateVariable>`, read case-insensitively.
pub const SEND_EVENTS_ATTRIBUTE: &str = "sendEvents";

/// Every element name the binder understands.
///
/// Anything that does not map to a variant is an extension and is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScpdElement {
    Scpd,
    SpecVersion,
    Major,
    Minor,
    ActionList,
    Action,
    Name,
    ArgumentList,
    Argument,
    Direction,
    RelatedStateVariable,
    Retval,
    ServiceStateTable,
    StateVariable,
    DataType,
    DefaultValue,
    AllowedValueList,
    AllowedValue,
    AllowedValueRange,
    Minimum,
    Maximum,
    Step,
}

impl ScpdElement {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScpdElement::Scpd => "scpd",
            ScpdElement::SpecVersion => "specVersion",
            ScpdElement::Major => "major",
            ScpdElement::Minor => "minor",
            ScpdElement::ActionList => "actionList",
            ScpdElement::Action => "action",
            ScpdElement::Name => "name",
            ScpdElement::ArgumentList => "argumentList",
            ScpdElement::Argument => "argument",
            ScpdElement::Direction => "direction",
            ScpdElement::RelatedStateVariable => "relatedStateVariable",
            ScpdElement::Retval => "retval",
            ScpdElement::ServiceStateTable => "serviceStateTable",
            ScpdElement::StateVariable => "stateVariable",
            ScpdElement::DataType => "dataType",
            ScpdElement::DefaultValue => "defaultValue",
            ScpdElement::AllowedValueList => "allowedValueList",
            ScpdElement::AllowedValue => "allowedValue",
            ScpdElement::AllowedValueRange => "allowedValueRange",
            ScpdElement::Minimum => "minimum",
            ScpdElement::Maximum => "maximum",
            ScpdElement::Step => "step",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let element = match name {
            "scpd" => ScpdElement::Scpd,
            "specVersion" => ScpdElement::SpecVersion,
            "major" => ScpdElement::Major,
            "minor" => ScpdElement::Minor,
            "actionList" => ScpdElement::ActionList,
            "action" => ScpdElement::Action,
            "name" => ScpdElement::Name,
            "argumentList" => ScpdElement::ArgumentList,
            "argument" => ScpdElement::Argument,
            "direction" => ScpdElement::Direction,
            "relatedStateVariable" => ScpdElement::RelatedStateVariable,
            "retval" => ScpdElement::Retval,
            "serviceStateTable" => ScpdElement::ServiceStateTable,
            "stateVariable" => ScpdElement::StateVariable,
            "dataType" => ScpdElement::DataType,
            "defaultValue" => ScpdElement::DefaultValue,
            "allowedValueList" => ScpdElement::AllowedValueList,
            "allowedValue" => ScpdElement::AllowedValue,
            "allowedValueRange" => ScpdElement::AllowedValueRange,
            "minimum" => ScpdElement::Minimum,
            "maximum" => ScpdElement::Maximum,
            "step" => ScpdElement::Step,
            _ => return None,
        };
        Some(element)
    }

    pub fn is(&self, name: &str) -> bool {
        self.as_str() == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_map_back() {
        for element in [
            ScpdElement::Scpd,
            ScpdElement::ServiceStateTable,
            ScpdElement::RelatedStateVariable,
            ScpdElement::Retval,
            ScpdElement::Step,
        ] {
            assert_eq!(ScpdElement::from_name(element.as_str()), Some(element));
        }
    }

    #[test]
    fn test_unknown_and_miscased_names() {
        assert_eq!(ScpdElement::from_name("X_vendorExtension"), None);
        assert_eq!(ScpdElement::from_name("SCPD"), None);
        assert!(ScpdElement::Name.is("name"));
    }
}
