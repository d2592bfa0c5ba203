//! SOAP action identifiers carried in the `SOAPACTION` header.
//!
//! Two wire forms exist:
//!
//! - `urn:<namespace>:service:<type>:<version>#<actionName>` for actions of a
//!   versioned service
//! - `urn:schemas-upnp-org:control-1-0#<actionName>` for the standard control
//!   actions (e.g. `QueryStateVariable`) that belong to no service type

use crate::error::{Result, TypeError};
use crate::grammar::{self, NAMESPACE, TYPE, UDA_NAME, UDA_NAMESPACE};
use crate::service_type::ServiceType;
use crate::urn;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Namespace of the unversioned control form.
pub const MAGIC_CONTROL_NAMESPACE: &str = UDA_NAMESPACE;

/// Type of the unversioned control form.
pub const MAGIC_CONTROL_TYPE: &str = "control-1-0";

static MAGIC_CONTROL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "^(?:urn:)?{}:{}#({UDA_NAME})$",
        regex::escape(MAGIC_CONTROL_NAMESPACE),
        regex::escape(MAGIC_CONTROL_TYPE)
    ))
    .expect("Invalid Regex")
});

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "^urn:({NAMESPACE}):service:({TYPE}):([0-9]+)#({UDA_NAME})$"
    ))
    .expect("Invalid Regex")
});

/// A fully identified SOAP action.
///
/// `version` is `None` only for the magic control form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoapActionType {
    namespace: String,
    type_name: String,
    action_name: String,
    version: Option<u32>,
}

impl SoapActionType {
    /// An action of the given service type.
    pub fn new(service_type: &ServiceType, action_name: impl Into<String>) -> Result<Self> {
        let action_name = check_action_name(action_name.into())?;
        Ok(Self {
            namespace: service_type.namespace().to_string(),
            type_name: service_type.type_name().to_string(),
            action_name,
            version: Some(service_type.version()),
        })
    }

    /// A standard control action without a service type.
    pub fn magic_control(action_name: impl Into<String>) -> Result<Self> {
        let action_name = check_action_name(action_name.into())?;
        Ok(Self {
            namespace: MAGIC_CONTROL_NAMESPACE.to_string(),
            type_name: MAGIC_CONTROL_TYPE.to_string(),
            action_name,
            version: None,
        })
    }

    /// Parse either wire form; the magic control form is tried first.
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = || TypeError::malformed("action type (namespace/type/version#actionName)", input);

        if let Some(captures) = MAGIC_CONTROL_PATTERN.captures(input) {
            return Self::magic_control(&captures[1]).map_err(|_| malformed());
        }

        let captures = PATTERN.captures(input).ok_or_else(malformed)?;
        let version = urn::parse_version(&captures[3]).map_err(|_| malformed())?;
        let action_name = check_action_name(captures[4].to_string()).map_err(|_| malformed())?;
        Ok(Self {
            namespace: captures[1].to_string(),
            type_name: captures[2].to_string(),
            action_name,
            version: Some(version),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Whether this is the unversioned standard control form.
    pub fn is_magic_control(&self) -> bool {
        self.version.is_none()
    }

    /// The service type owning this action, `None` for the magic control form.
    pub fn service_type(&self) -> Option<ServiceType> {
        let version = self.version?;
        ServiceType::new(self.namespace.clone(), self.type_name.clone(), version).ok()
    }

    /// The part before `#`.
    pub fn type_string(&self) -> String {
        match self.version {
            Some(version) => format!("urn:{}:service:{}:{}", self.namespace, self.type_name, version),
            None => format!("urn:{}:{}", self.namespace, self.type_name),
        }
    }
}

fn check_action_name(action_name: String) -> Result<String> {
    if grammar::is_valid_uda_name(&action_name) {
        Ok(action_name)
    } else {
        Err(TypeError::invalid("action name", action_name))
    }
}

impl fmt::Display for SoapActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_string(), self.action_name)
    }
}

impl FromStr for SoapActionType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for SoapActionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SoapActionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_service_action() {
        let action = SoapActionType::parse("urn:schemas-upnp-org:service:AVTransport:1#Play").unwrap();
        assert_eq!(action.namespace(), "schemas-upnp-org");
        assert_eq!(action.type_name(), "AVTransport");
        assert_eq!(action.action_name(), "Play");
        assert_eq!(action.version(), Some(1));
        assert!(!action.is_magic_control());
        assert_eq!(
            action.service_type(),
            Some(ServiceType::uda("AVTransport", 1).unwrap())
        );
    }

    #[rstest]
    #[case("urn:schemas-upnp-org:control-1-0#QueryStateVariable")]
    #[case("schemas-upnp-org:control-1-0#QueryStateVariable")]
    fn test_parse_magic_control(#[case] input: &str) {
        let action = SoapActionType::parse(input).unwrap();
        assert!(action.is_magic_control());
        assert_eq!(action.version(), None);
        assert_eq!(action.service_type(), None);
        assert_eq!(action.action_name(), "QueryStateVariable");
        assert_eq!(action.to_string(), "urn:schemas-upnp-org:control-1-0#QueryStateVariable");
    }

    #[rstest]
    #[case("urn:schemas-upnp-org:service:AVTransport:1")]
    #[case("urn:schemas-upnp-org:service:AVTransport:1#")]
    #[case("urn:schemas-upnp-org:service:AVTransport#Play")]
    #[case("urn:schemas-upnp-org:device:MediaRenderer:1#Play")]
    #[case("urn:schemas-upnp-org:control-1-0#")]
    #[case("urn:schemas-upnp-org:service:AVTransport:1#xmlPlay")]
    #[case("urn:schemas-upnp-org:service:AVTransport:1#Play Now")]
    fn test_malformed_action(#[case] input: &str) {
        let err = SoapActionType::parse(input).unwrap_err();
        assert!(matches!(err, TypeError::MalformedIdentifier { .. }));
        assert_eq!(err.offending_input(), input);
    }

    #[test]
    fn test_constructors() {
        let service_type = ServiceType::uda("RenderingControl", 2).unwrap();
        let action = SoapActionType::new(&service_type, "SetVolume").unwrap();
        assert_eq!(action.type_string(), "urn:schemas-upnp-org:service:RenderingControl:2");
        assert_eq!(action.to_string(), "urn:schemas-upnp-org:service:RenderingControl:2#SetVolume");

        assert!(SoapActionType::new(&service_type, "Set Volume").is_err());
        assert!(SoapActionType::magic_control("").is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_soap_action_round_trip(
            namespace in "[a-zA-Z0-9\\-\\.]{1,24}",
            type_name in "[a-zA-Z_0-9\\-]{1,64}",
            version in proptest::option::of(1u32..100),
            action_name in "[a-zA-Z_][a-zA-Z0-9_\\-\\.]{0,30}",
        ) {
            prop_assume!(!action_name.to_lowercase().starts_with("xml"));

            let action = match version {
                Some(version) => {
                    let service_type = ServiceType::new(namespace, type_name, version).unwrap();
                    SoapActionType::new(&service_type, action_name).unwrap()
                }
                None => SoapActionType::magic_control(action_name).unwrap(),
            };
            prop_assert_eq!(SoapActionType::parse(&action.to_string()).unwrap(), action);
        }
    }
}
