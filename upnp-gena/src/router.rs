use crate::message::{StreamRequestMessage, StreamResponseMessage};

/// Sends GENA requests over whatever transport the application uses.
///
/// `None` means the exchange produced no response at all (connection
/// failure, timeout). Timeouts are the transport's responsibility.
#[cfg_attr(test, mockall::automock)]
pub trait Router: Send + Sync {
    fn send(&self, request: &StreamRequestMessage) -> Option<StreamResponseMessage>;
}
