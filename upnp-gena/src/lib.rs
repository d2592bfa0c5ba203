//! GENA event subscriptions for UPnP control points
//!
//! This crate manages the lifecycle of subscriptions a control point holds on
//! remote services: SUBSCRIBE, renewal before the granted duration runs out,
//! UNSUBSCRIBE, expiry and event sequence tracking.
//!
//! # Subscription Management
//!
//! Transport, storage and listener dispatch are supplied by the application
//! through the [`Router`], [`SubscriptionRegistry`] and [`ListenerExecutor`]
//! traits. [`GenaClient`] ties them together:
//!
//! ```rust,ignore
//! use upnp_gena::{GenaClient, GenaConfig, InMemorySubscriptionRegistry, TokioExecutor};
//!
//! let client = GenaClient::new(
//!     Arc::new(http_router),
//!     Arc::new(InMemorySubscriptionRegistry::new()),
//!     Arc::new(TokioExecutor::current()?),
//!     GenaConfig::default(),
//! )?;
//!
//! let mut subscription = client.subscribe(target, vec![callback_url], Arc::new(listener))?;
//!
//! for mut due in client.subscriptions_due_for_renewal(Instant::now()) {
//!     // Failures end the subscription and notify the listener
//!     let _ = client.renew(&mut due);
//! }
//!
//! client.unsubscribe(&mut subscription);
//! ```
//!
//! Registry changes always happen before the listener hears about them, and
//! listeners are never called on the thread doing the network exchange.

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod message;
pub mod protocol;
pub mod registry;
pub mod router;
pub mod subscription;

pub use client::GenaClient;
pub use config::GenaConfig;
pub use error::{GenaError, Result};
pub use executor::{ListenerExecutor, Task, TokioExecutor};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};
pub use message::{GenaMethod, ResponseStatus, StreamRequestMessage, StreamResponseMessage, UpnpHeaders};
pub use protocol::{SendingRenewal, SendingSubscribe, SendingUnsubscribe};
pub use registry::{InMemorySubscriptionRegistry, SubscriptionRegistry};
pub use router::Router;
pub use subscription::{
    CancelReason, RemoteSubscription, SequenceCheck, SubscriptionCallback, SubscriptionStatus, SubscriptionTarget,
};
