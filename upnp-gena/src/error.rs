use crate::message::ResponseStatus;
use crate::subscription::SubscriptionStatus;
use thiserror::Error;

/// Errors raised by the GENA subscription protocols
#[derive(Debug, Error)]
pub enum GenaError {
    /// A header value does not follow its wire grammar
    ///
    /// Carries the raw value, e.g. a `TIMEOUT` that is not `Second-N`.
    #[error("Malformed {header} header: '{value}'")]
    MalformedHeader {
        header: &'static str,
        value: String,
    },

    /// A successful response lacks a header the protocol needs
    #[error("Missing {0} header in response")]
    MissingHeader(&'static str),

    /// The router returned no response (transport failure or timeout)
    #[error("No response received from {0}")]
    NoResponse(String),

    /// The device answered with a non-success status
    #[error("Request rejected by device: {0}")]
    Rejected(ResponseStatus),

    /// The subscription cannot take part in the requested exchange
    #[error("Subscription {subscription_id} is {status}")]
    InvalidState {
        subscription_id: String,
        status: SubscriptionStatus,
    },

    /// Invalid configuration provided
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Type alias for results that can return a GenaError
pub type Result<T> = std::result::Result<T, GenaError>;
