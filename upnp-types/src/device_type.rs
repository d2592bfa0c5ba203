//! Device type URNs (`urn:<namespace>:device:<type>:<version>`).

use crate::error::{Result, TypeError};
use crate::grammar::UDA_NAMESPACE;
use crate::urn::{self, UrnParts};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PATTERN: LazyLock<Regex> = LazyLock::new(|| urn::generic_pattern("device"));
static UDA_PATTERN: LazyLock<Regex> = LazyLock::new(|| urn::uda_pattern("device"));

/// A versioned UPnP device type, e.g. `urn:schemas-upnp-org:device:MediaRenderer:1`.
///
/// Equality and hashing cover the namespace, the type and the version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceType {
    namespace: String,
    type_name: String,
    version: u32,
}

impl DeviceType {
    /// Create a device type, rejecting illegal namespaces, types and a zero version.
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

    /// Create a device type in the UPnP Forum standard namespace.
    pub fn uda(type_name: impl Into<String>, version: u32) -> Result<Self> {
        Self::new(UDA_NAMESPACE, type_name, version)
    }

    /// Parse a device type string.
    ///
    /// The standard-namespace grammar is tried first, then the generic one.
    /// Both paths produce equal values for the same input.
    pub fn parse(input: &str) -> Result<Self> {
        urn::match_uda(&UDA_PATTERN, input)
            .or_else(|| urn::match_generic(&PATTERN, input))
            .map(Self::from)
            .ok_or_else(|| TypeError::malformed("device type (namespace/type/version)", input))
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

    /// Whether this type lives in the UPnP Forum standard namespace.
    pub fn is_uda(&self) -> bool {
        self.namespace == UDA_NAMESPACE
    }

    /// Whether a device of this type can stand in for a device of type `other`.
    ///
    /// Namespace and type must match; this version must be at least `other`'s.
    pub fn implements_version(&self, other: &DeviceType) -> bool {
        self.namespace == other.namespace
            && self.type_name == other.type_name
            && self.version >= other.version
    }

    /// Short human-readable form (the type name only).
    pub fn display_string(&self) -> &str {
        &self.type_name
    }
}

impl From<UrnParts> for DeviceType {
    fn from(parts: UrnParts) -> Self {
        Self {
            namespace: parts.namespace,
            type_name: parts.type_name,
            version: parts.version,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "urn:{}:device:{}:{}", self.namespace, self.type_name, self.version)
    }
}

impl FromStr for DeviceType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for DeviceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeviceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
