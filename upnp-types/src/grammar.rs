//! Character-class grammar shared by every UPnP identifier.
//!
//! The fragments below are combined into anchored patterns for the device,
//! service and SOAP action URN forms. Patterns are compiled once on first use.

use regex::Regex;
use std::sync::LazyLock;

/// The namespace reserved for UPnP Forum standard types.
pub const UDA_NAMESPACE: &str = "schemas-upnp-org";

/// Namespace fragment of a URN, e.g. `schemas-upnp-org` or `schemas-sonos-com`.
pub const NAMESPACE: &str = r"[a-zA-Z0-9\-\.]+";

/// Type fragment of a URN, e.g. `MediaRenderer` or `AVTransport`.
pub const TYPE: &str = r"[a-zA-Z_0-9\-]{1,64}";

/// Action, argument and state variable names.
pub const UDA_NAME: &str = r"[\p{L}\p{N}_][\p{L}\p{N}_\-\.\p{Mc}\p{Sk}]*";

/// UDA names must be shorter than this many characters.
pub const MAX_UDA_NAME_LENGTH: usize = 32;

static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{NAMESPACE}$")).expect("Invalid Regex"));

static TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{TYPE}$")).expect("Invalid Regex"));

static UDA_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{UDA_NAME}$")).expect("Invalid Regex"));

/// Check a URN namespace fragment.
pub fn is_valid_namespace(namespace: &str) -> bool {
    NAMESPACE_PATTERN.is_match(namespace)
}

/// Check a URN type fragment (at most 64 characters).
pub fn is_valid_type(type_name: &str) -> bool {
    TYPE_PATTERN.is_match(type_name)
}

/// Check a name against the UDA naming rules.
///
/// Names may not be empty, may not start with `xml` in any letter case and
/// must be shorter than [`MAX_UDA_NAME_LENGTH`] characters.
pub fn is_valid_uda_name(name: &str) -> bool {
    if name.is_empty() || name.to_lowercase().starts_with("xml") {
        return false;
    }
    if !UDA_NAME_PATTERN.is_match(name) {
        return false;
    }
    name.chars().count() < MAX_UDA_NAME_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("schemas-upnp-org", true)]
    #[case("schemas.example.com", true)]
    #[case("", false)]
    #[case("has space", false)]
    #[case("colon:ns", false)]
    fn test_namespace(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_namespace(input), expected);
    }

    #[rstest]
    #[case("MediaRenderer", true)]
    #[case("WAN_IP-Connection", true)]
    #[case("", false)]
    #[case("dot.type", false)]
    fn test_type(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_type(input), expected);
    }

    #[test]
    fn test_type_length_limit() {
        assert!(is_valid_type(&"a".repeat(64)));
        assert!(!is_valid_type(&"a".repeat(65)));
    }

    #[rstest]
    #[case("InstanceID", true)]
    #[case("A_ARG_TYPE_SeekMode", true)]
    #[case("_private", true)]
    #[case("Volume.Master", true)]
    #[case("Lautstärke", true)]
    #[case("", false)]
    #[case("Bad Name", false)]
    #[case("-leading", false)]
    #[case("xmlThing", false)]
    #[case("XMLThing", false)]
    #[case("semi;colon", false)]
    fn test_uda_name(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_uda_name(input), expected);
    }

    #[test]
    fn test_uda_name_length_limit() {
        assert!(is_valid_uda_name(&"n".repeat(31)));
        assert!(!is_valid_uda_name(&"n".repeat(32)));
    }
}
