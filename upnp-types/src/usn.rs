//! Unique device names and unique service names.
//!
//! These values appear in the `USN` header of discovery messages and identify
//! which device a subscription belongs to.

use crate::device_type::DeviceType;
use crate::error::{Result, TypeError};
use crate::service_type::ServiceType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const UDN_PREFIX: &str = "uuid:";
const USN_SEPARATOR: &str = "::";

/// Unique device name, e.g. `uuid:RINCON_000E58A0123456`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Udn(String);

impl Udn {
    /// Create a UDN from its identifier part (without the `uuid:` prefix).
    pub fn new(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.is_empty()
            || identifier.contains(USN_SEPARATOR)
            || identifier.chars().any(char::is_whitespace)
        {
            return Err(TypeError::invalid("UDN identifier", identifier));
        }
        Ok(Self(identifier))
    }

    /// A fresh random UDN.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Parse the `uuid:<identifier>` form.
    pub fn parse(input: &str) -> Result<Self> {
        input
            .strip_prefix(UDN_PREFIX)
            .and_then(|identifier| Self::new(identifier).ok())
            .ok_or_else(|| TypeError::malformed("UDN", input))
    }

    /// The identifier without the `uuid:` prefix.
    pub fn identifier(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Udn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", UDN_PREFIX, self.0)
    }
}

impl FromStr for Udn {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Udn {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Udn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// `<udn>::<device type>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceUsn {
    pub udn: Udn,
    pub device_type: DeviceType,
}

impl DeviceUsn {
    pub fn new(udn: Udn, device_type: DeviceType) -> Self {
        Self { udn, device_type }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let malformed = || TypeError::malformed("device USN", input);
        let (udn, device_type) = input.split_once(USN_SEPARATOR).ok_or_else(malformed)?;
        Ok(Self {
            udn: Udn::parse(udn).map_err(|_| malformed())?,
            device_type: DeviceType::parse(device_type).map_err(|_| malformed())?,
        })
    }
}

impl fmt::Display for DeviceUsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.udn, USN_SEPARATOR, self.device_type)
    }
}

impl FromStr for DeviceUsn {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// `<udn>::<service type>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceUsn {
    pub udn: Udn,
    pub service_type: ServiceType,
}

impl ServiceUsn {
    pub fn new(udn: Udn, service_type: ServiceType) -> Self {
        Self { udn, service_type }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let malformed = || TypeError::malformed("service USN", input);
        let (udn, service_type) = input.split_once(USN_SEPARATOR).ok_or_else(malformed)?;
        Ok(Self {
            udn: Udn::parse(udn).map_err(|_| malformed())?,
            service_type: ServiceType::parse(service_type).map_err(|_| malformed())?,
        })
    }
}

impl fmt::Display for ServiceUsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.udn, USN_SEPARATOR, self.service_type)
    }
}

impl FromStr for ServiceUsn {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
