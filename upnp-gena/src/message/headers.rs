//! GENA header names and value codecs.

use crate::error::{GenaError, Result};
use url::Url;

pub const SID: &str = "SID";
pub const TIMEOUT: &str = "TIMEOUT";
pub const CALLBACK: &str = "CALLBACK";
pub const NT: &str = "NT";
pub const SEQ: &str = "SEQ";
pub const USER_AGENT: &str = "USER-AGENT";

/// Value of the `NT` header on subscribe requests.
pub const NT_EVENT: &str = "upnp:event";

/// Duration used for `Second-infinite`.
pub const INFINITE_DURATION: u32 = u32::MAX;

const TIMEOUT_PREFIX: &str = "Second-";
const TIMEOUT_INFINITE: &str = "infinite";

/// Ordered header list with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpnpHeaders {
    entries: Vec<(String, String)>,
}

impl UpnpHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a value, keeping earlier ones.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replace every value of `name` with a single one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.entries.push((name, value.into()));
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UpnpHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// `Second-N`, or `Second-infinite` for [`INFINITE_DURATION`].
pub fn format_timeout(seconds: u32) -> String {
    if seconds == INFINITE_DURATION {
        format!("{TIMEOUT_PREFIX}{TIMEOUT_INFINITE}")
    } else {
        format!("{TIMEOUT_PREFIX}{seconds}")
    }
}

/// Parse a `TIMEOUT` value; the prefix and `infinite` ignore case.
pub fn parse_timeout(value: &str) -> Result<u32> {
    let malformed = || GenaError::MalformedHeader {
        header: TIMEOUT,
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let seconds = trimmed
        .get(..TIMEOUT_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(TIMEOUT_PREFIX))
        .map(|_| &trimmed[TIMEOUT_PREFIX.len()..])
        .ok_or_else(malformed)?;

    if seconds.eq_ignore_ascii_case(TIMEOUT_INFINITE) {
        return Ok(INFINITE_DURATION);
    }
    seconds.parse::<u32>().map_err(|_| malformed())
}

/// `<url1><url2>...`
pub fn format_callback(urls: &[Url]) -> String {
    urls.iter().map(|url| format!("<{url}>")).collect()
}

/// Parse a `CALLBACK` value into its delivery URLs.
pub fn parse_callback(value: &str) -> Result<Vec<Url>> {
    let malformed = || GenaError::MalformedHeader {
        header: CALLBACK,
        value: value.to_string(),
    };

    let mut urls = Vec::new();
    let mut rest = value.trim();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('<').ok_or_else(malformed)?;
        let (url, tail) = inner.split_once('>').ok_or_else(malformed)?;
        urls.push(Url::parse(url.trim()).map_err(|_| malformed())?);
        rest = tail.trim_start();
    }

    if urls.is_empty() {
        return Err(malformed());
    }
    Ok(urls)
}

/// Parse a `SEQ` value.
pub fn parse_sequence(value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| GenaError::MalformedHeader {
        header: SEQ,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_headers_ignore_case() {
        let mut headers = UpnpHeaders::new();
        headers.add("Sid", "uuid:sub-1");
        headers.add("timeout", "Second-1800");

        assert_eq!(headers.get(SID), Some("uuid:sub-1"));
        assert_eq!(headers.get("TIMEOUT"), Some("Second-1800"));
        assert!(!headers.contains(SEQ));

        headers.set(SID, "uuid:sub-2");
        assert_eq!(headers.get("sid"), Some("uuid:sub-2"));
        assert_eq!(headers.len(), 2);

        headers.remove("Timeout");
        assert!(headers.get(TIMEOUT).is_none());
    }

    #[test]
    fn test_headers_keep_order() {
        let headers: UpnpHeaders = [("NT", "upnp:event"), ("X-Extra", "1"), ("x-extra", "2")]
            .into_iter()
            .collect();
        let extra: Vec<&str> = headers.get_all("X-EXTRA").collect();
        assert_eq!(extra, vec!["1", "2"]);
        assert_eq!(headers.iter().next(), Some(("NT", "upnp:event")));
    }

    #[rstest]
    #[case("Second-1800", 1800)]
    #[case("second-300", 300)]
    #[case(" Second-60 ", 60)]
    #[case("Second-infinite", INFINITE_DURATION)]
    #[case("SECOND-INFINITE", INFINITE_DURATION)]
    fn test_parse_timeout(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(parse_timeout(value).unwrap(), expected);
    }

    #[rstest]
    #[case("1800")]
    #[case("Second-")]
    #[case("Second--5")]
    #[case("Minute-30")]
    fn test_malformed_timeout(#[case] value: &str) {
        let err = parse_timeout(value).unwrap_err();
        assert!(matches!(err, GenaError::MalformedHeader { header: TIMEOUT, .. }));
    }

    #[test]
    fn test_format_timeout() {
        assert_eq!(format_timeout(1800), "Second-1800");
        assert_eq!(format_timeout(INFINITE_DURATION), "Second-infinite");
        assert_eq!(parse_timeout(&format_timeout(42)).unwrap(), 42);
    }

    #[test]
    fn test_callback_codec() {
        let urls = vec![
            Url::parse("http://192.168.1.50:3400/notify/1").unwrap(),
            Url::parse("http://10.0.0.5:3400/notify/1").unwrap(),
        ];
        let value = format_callback(&urls);
        assert_eq!(value, "<http://192.168.1.50:3400/notify/1><http://10.0.0.5:3400/notify/1>");
        assert_eq!(parse_callback(&value).unwrap(), urls);
    }

    #[rstest]
    #[case("")]
    #[case("http://192.168.1.50:3400/notify")]
    #[case("<http://192.168.1.50:3400/notify")]
    #[case("<not a url>")]
    fn test_malformed_callback(#[case] value: &str) {
        assert!(parse_callback(value).is_err());
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(parse_sequence("0").unwrap(), 0);
        assert_eq!(parse_sequence(" 17 ").unwrap(), 17);
        assert!(parse_sequence("-1").is_err());
    }
}
