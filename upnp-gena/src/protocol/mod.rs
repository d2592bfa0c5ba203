//! GENA protocol exchanges
//!
//! Each exchange is one synchronous round trip through the [`crate::Router`].
//! Registry changes happen on the calling thread before any listener is
//! notified; notifications go through the [`crate::ListenerExecutor`].

mod expire;
mod renewal;
mod sequence;
mod subscribe;
mod unsubscribe;

pub use expire::{expire_subscriptions, remove_device_subscriptions};
pub use renewal::SendingRenewal;
pub use sequence::receive_event_sequence;
pub use subscribe::SendingSubscribe;
pub use unsubscribe::SendingUnsubscribe;
