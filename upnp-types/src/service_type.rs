//! Service type URNs (`urn:<namespace>:service:<type>:<version>`).

use crate::error::{Result, TypeError};
use crate::grammar::UDA_NAMESPACE;
use crate::urn::{self, UrnParts};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PATTERN: LazyLock<Regex> = LazyLock::new(|| urn::generic_pattern("service"));
static UDA_PATTERN: LazyLock<Regex> = LazyLock::new(|| urn::uda_pattern("service"));

/// A versioned UPnP service type, e.g. `urn:schemas-upnp-org:service:AVTransport:1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceType {
    namespace: String,
    type_name: String,
    version: u32,
}

impl ServiceType {
    /// Create a service type, rejecting illegal namespaces, types and a zero version.
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>, version: u32) -> Result<Self> {
        let namespace = namespace.into();
        let type_name = type_name.into();
        urn::check_components(&namespace, &type_name, version)?;
        Ok(Self {
            namespace,
            type_name,
            version,
        })
    }

    /// Create a service type in the UPnP Forum standard namespace.
    pub fn uda(type_name: impl Into<String>, version: u32) -> Result<Self> {
        Self::new(UDA_NAMESPACE, type_name, version)
    }

    /// Parse a service type string, trying the standard namespace first.
    pub fn parse(input: &str) -> Result<Self> {
        urn::match_uda(&UDA_PATTERN, input)
            .or_else(|| urn::match_generic(&PATTERN, input))
            .map(Self::from)
            .ok_or_else(|| TypeError::malformed("service type (namespace/type/version)", input))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_uda(&self) -> bool {
        self.namespace == UDA_NAMESPACE
    }

    /// Whether this service can stand in for a service of type `other`.
    pub fn implements_version(&self, other: &ServiceType) -> bool {
        self.namespace == other.namespace
            && self.type_name == other.type_name
            && self.version >= other.version
    }

    pub fn display_string(&self) -> &str {
        &self.type_name
    }
}

impl From<UrnParts> for ServiceType {
    fn from(parts: UrnParts) -> Self {
        Self {
            namespace: parts.namespace,
            type_name: parts.type_name,
            version: parts.version,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "urn:{}:service:{}:{}", self.namespace, self.type_name, self.version)
    }
}

impl FromStr for ServiceType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ServiceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ServiceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_service_type_round_trip(
            namespace in "[a-zA-Z0-9\\-\\.]{1,24}",
            type_name in "[a-zA-Z_0-9\\-]{1,64}",
            version in 1u32..1000,
        ) {
            let service_type = ServiceType::new(namespace, type_name, version).unwrap();
            prop_assert_eq!(ServiceType::parse(&service_type.to_string()).unwrap(), service_type);
        }
    }
}
