use crate::config::GenaConfig;
use crate::error::Result;
use crate::executor::ListenerExecutor;
use crate::message::{ResponseStatus, StreamResponseMessage};
use crate::protocol::{self, SendingRenewal, SendingSubscribe, SendingUnsubscribe};
use crate::registry::SubscriptionRegistry;
use crate::router::Router;
use crate::subscription::{CancelReason, RemoteSubscription, SequenceCheck, SubscriptionCallback, SubscriptionTarget};
use std::sync::Arc;
use std::time::Instant;
use upnp_types::Udn;
use url::Url;

/// Control point side of GENA: owns the collaborators every protocol needs.
///
/// # Example
///
/// ```rust,ignore
/// let client = GenaClient::new(
///     Arc::new(my_router),
///     Arc::new(InMemorySubscriptionRegistry::new()),
///     Arc::new(TokioExecutor::current()?),
///     GenaConfig::default(),
/// )?;
///
/// let mut subscription = client.subscribe(target, vec![callback_url], Arc::new(listener))?;
///
/// // Later, from a scheduler:
/// if subscription.needs_renewal(Instant::now(), client.config().renewal_threshold) {
///     client.renew(&mut subscription)?;
/// }
///
/// client.unsubscribe(&mut subscription);
/// ```
pub struct GenaClient {
    router: Arc<dyn Router>,
    registry: Arc<dyn SubscriptionRegistry>,
    executor: Arc<dyn ListenerExecutor>,
    config: GenaConfig,
}

impl GenaClient {
    pub fn new(
        router: Arc<dyn Router>,
        registry: Arc<dyn SubscriptionRegistry>,
        executor: Arc<dyn ListenerExecutor>,
        config: GenaConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            router,
            registry,
            executor,
            config,
        })
    }

    pub fn config(&self) -> &GenaConfig {
        &self.config
    }

    pub fn router(&self) -> &dyn Router {
        self.router.as_ref()
    }

    pub fn registry(&self) -> &dyn SubscriptionRegistry {
        self.registry.as_ref()
    }

    /// Subscribe with the configured duration.
    pub fn subscribe(
        &self,
        target: SubscriptionTarget,
        callback_urls: Vec<Url>,
        callback: Arc<dyn SubscriptionCallback>,
    ) -> Result<RemoteSubscription> {
        SendingSubscribe::new(self).execute(target, callback_urls, callback)
    }

    pub fn renew(&self, subscription: &mut RemoteSubscription) -> Result<StreamResponseMessage> {
        SendingRenewal::new(self).execute(subscription)
    }

    pub fn unsubscribe(&self, subscription: &mut RemoteSubscription) -> Option<StreamResponseMessage> {
        SendingUnsubscribe::new(self).execute(subscription)
    }

    /// Registered subscriptions whose renewal window has opened.
    pub fn subscriptions_due_for_renewal(&self, now: Instant) -> Vec<RemoteSubscription> {
        self.registry
            .remote_subscriptions()
            .into_iter()
            .filter(|subscription| subscription.needs_renewal(now, self.config.renewal_threshold))
            .collect()
    }

    pub fn expire_subscriptions(&self, now: Instant) -> Vec<RemoteSubscription> {
        protocol::expire_subscriptions(self, now)
    }

    pub fn remove_device(&self, udn: &Udn) -> Vec<RemoteSubscription> {
        protocol::remove_device_subscriptions(self, udn)
    }

    pub fn receive_event_sequence(&self, subscription: &mut RemoteSubscription, sequence: u32) -> SequenceCheck {
        protocol::receive_event_sequence(self, subscription, sequence)
    }

    pub(crate) fn notify_established(&self, subscription: &RemoteSubscription) {
        let snapshot = subscription.clone();
        self.executor.execute(Box::new(move || {
            snapshot.callback().established(&snapshot);
        }));
    }

    pub(crate) fn notify_ended(
        &self,
        subscription: &RemoteSubscription,
        reason: CancelReason,
        response: Option<ResponseStatus>,
    ) {
        let snapshot = subscription.clone();
        self.executor.execute(Box::new(move || {
            snapshot.callback().ended(&snapshot, reason, response.as_ref());
        }));
    }

    pub(crate) fn notify_events_missed(&self, subscription: &RemoteSubscription, missed: u32) {
        let snapshot = subscription.clone();
        self.executor.execute(Box::new(move || {
            snapshot.callback().events_missed(&snapshot, missed);
        }));
    }
}
