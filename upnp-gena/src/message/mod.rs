//! GENA request and response messages
//!
//! These are transport-neutral: a [`crate::Router`] turns a
//! [`StreamRequestMessage`] into an HTTP exchange and hands back the
//! [`StreamResponseMessage`], or nothing when the exchange failed.

pub mod headers;

pub use headers::UpnpHeaders;

use crate::error::Result;
use std::fmt;
use url::Url;

/// HTTP methods used by GENA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenaMethod {
    Subscribe,
    Unsubscribe,
    Notify,
}

impl GenaMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenaMethod::Subscribe => "SUBSCRIBE",
            GenaMethod::Unsubscribe => "UNSUBSCRIBE",
            GenaMethod::Notify => "NOTIFY",
        }
    }
}

impl fmt::Display for GenaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status line of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    pub status_code: u16,
    pub status_message: String,
}

impl ResponseStatus {
    pub fn new(status_code: u16, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200, "OK")
    }

    /// Anything outside 1xx and 2xx.
    pub fn is_failed(&self) -> bool {
        self.status_code >= 300
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code, self.status_message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequestMessage {
    method: GenaMethod,
    uri: Url,
    headers: UpnpHeaders,
}

impl StreamRequestMessage {
    pub fn new(method: GenaMethod, uri: Url) -> Self {
        Self {
            method,
            uri,
            headers: UpnpHeaders::new(),
        }
    }

    /// Initial subscription: `CALLBACK`, `NT` and `TIMEOUT`.
    pub fn subscribe(uri: Url, callback_urls: &[Url], requested_duration_seconds: u32, user_agent: &str) -> Self {
        let mut request = Self::new(GenaMethod::Subscribe, uri);
        request.headers.set(headers::CALLBACK, headers::format_callback(callback_urls));
        request.headers.set(headers::NT, headers::NT_EVENT);
        request
            .headers
            .set(headers::TIMEOUT, headers::format_timeout(requested_duration_seconds));
        if !user_agent.is_empty() {
            request.headers.set(headers::USER_AGENT, user_agent);
        }
        request
    }

    /// Renewal: `SID` and `TIMEOUT`, no `CALLBACK` or `NT`.
    pub fn renewal(uri: Url, subscription_id: &str, requested_duration_seconds: u32) -> Self {
        let mut request = Self::new(GenaMethod::Subscribe, uri);
        request.headers.set(headers::SID, subscription_id);
        request
            .headers
            .set(headers::TIMEOUT, headers::format_timeout(requested_duration_seconds));
        request
    }

    pub fn unsubscribe(uri: Url, subscription_id: &str) -> Self {
        let mut request = Self::new(GenaMethod::Unsubscribe, uri);
        request.headers.set(headers::SID, subscription_id);
        request
    }

    pub fn method(&self) -> GenaMethod {
        self.method
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn headers(&self) -> &UpnpHeaders {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut UpnpHeaders {
        &mut self.headers
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.headers.get(headers::SID)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamResponseMessage {
    status: ResponseStatus,
    headers: UpnpHeaders,
}

impl StreamResponseMessage {
    pub fn new(status: ResponseStatus) -> Self {
        Self {
            status,
            headers: UpnpHeaders::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    pub fn status(&self) -> &ResponseStatus {
        &self.status
    }

    pub fn headers(&self) -> &UpnpHeaders {
        &self.headers
    }

    pub fn is_failed(&self) -> bool {
        self.status.is_failed()
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.headers.get(headers::SID)
    }

    /// The granted duration; `None` when the header is absent.
    pub fn timeout_seconds(&self) -> Result<Option<u32>> {
        self.headers
            .get(headers::TIMEOUT)
            .map(headers::parse_timeout)
            .transpose()
    }
}
