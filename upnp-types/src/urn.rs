//! Parsing of `urn:<namespace>:<kind>:<type>:<version>` strings.

use crate::error::{Result, TypeError};
use crate::grammar::{self, NAMESPACE, TYPE, UDA_NAMESPACE};
use regex::Regex;

/// The three components of a versioned type URN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UrnParts {
    pub namespace: String,
    pub type_name: String,
    pub version: u32,
}

/// Build the generic anchored pattern for `kind` (`device` or `service`).
pub(crate) fn generic_pattern(kind: &str) -> Regex {
    Regex::new(&format!("^urn:({NAMESPACE}):{kind}:({TYPE}):([0-9]+)$")).expect("Invalid Regex")
}

/// Build the pattern restricted to the UDA standard namespace.
pub(crate) fn uda_pattern(kind: &str) -> Regex {
    Regex::new(&format!(
        "^urn:{}:{kind}:({TYPE}):([0-9]+)$",
        regex::escape(UDA_NAMESPACE)
    ))
    .expect("Invalid Regex")
}

pub(crate) fn match_uda(pattern: &Regex, input: &str) -> Option<UrnParts> {
    let captures = pattern.captures(input)?;
    let version = parse_version(&captures[2]).ok()?;
    Some(UrnParts {
        namespace: UDA_NAMESPACE.to_string(),
        type_name: captures[1].to_string(),
        version,
    })
}

pub(crate) fn match_generic(pattern: &Regex, input: &str) -> Option<UrnParts> {
    let captures = pattern.captures(input)?;
    let version = parse_version(&captures[3]).ok()?;
    Some(UrnParts {
        namespace: captures[1].to_string(),
        type_name: captures[2].to_string(),
        version,
    })
}

/// Versions are positive decimal integers.
pub(crate) fn parse_version(digits: &str) -> Result<u32> {
    match digits.parse::<u32>() {
        Ok(version) if version >= 1 => Ok(version),
        _ => Err(TypeError::invalid("version", digits)),
    }
}

/// Validate the components of a type URN before constructing it.
pub(crate) fn check_components(namespace: &str, type_name: &str, version: u32) -> Result<()> {
    if !grammar::is_valid_namespace(namespace) {
        return Err(TypeError::invalid("namespace", namespace));
    }
    if !grammar::is_valid_type(type_name) {
        return Err(TypeError::invalid("type", type_name));
    }
    if version == 0 {
        return Err(TypeError::invalid("version", version));
    }
    Ok(())
}
