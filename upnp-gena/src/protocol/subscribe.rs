use crate::client::GenaClient;
use crate::error::{GenaError, Result};
use crate::message::headers;
use crate::message::StreamRequestMessage;
use crate::subscription::{RemoteSubscription, SubscriptionCallback, SubscriptionTarget};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Establishes a new subscription on a remote service.
pub struct SendingSubscribe<'a> {
    client: &'a GenaClient,
    requested_duration_seconds: Option<u32>,
}

impl<'a> SendingSubscribe<'a> {
    pub fn new(client: &'a GenaClient) -> Self {
        Self {
            client,
            requested_duration_seconds: None,
        }
    }

    /// Ask for a specific duration instead of the configured one.
    pub fn with_requested_duration(mut self, seconds: u32) -> Self {
        self.requested_duration_seconds = Some(seconds);
        self
    }

    /// On success the subscription is registered and `established` is
    /// dispatched to `callback`. Failures leave the registry untouched.
    pub fn execute(
        &self,
        target: SubscriptionTarget,
        callback_urls: Vec<Url>,
        callback: Arc<dyn SubscriptionCallback>,
    ) -> Result<RemoteSubscription> {
        if callback_urls.is_empty() {
            return Err(GenaError::Configuration(
                "A subscription needs at least one callback URL".to_string(),
            ));
        }

        let config = self.client.config();
        let requested = config.effective_duration_seconds(self.requested_duration_seconds);
        let request = StreamRequestMessage::subscribe(
            target.event_subscription_url().clone(),
            &callback_urls,
            requested,
            &config.user_agent,
        );

        debug!(
            "Subscribing to {} on {} ({} evented variables)",
            target.service_type(),
            target.udn(),
            target.evented_variables().len()
        );

        let response = self
            .client
            .router()
            .send(&request)
            .ok_or_else(|| GenaError::NoResponse(target.event_subscription_url().to_string()))?;

        if response.is_failed() {
            warn!("Subscription to {} rejected: {}", target.service_type(), response.status());
            return Err(GenaError::Rejected(response.status().clone()));
        }

        let id = response
            .subscription_id()
            .ok_or(GenaError::MissingHeader(headers::SID))?
            .to_string();

        let actual = match response.timeout_seconds() {
            Ok(Some(seconds)) => seconds,
            Ok(None) => requested,
            Err(e) => {
                warn!("Ignoring subscribe response header of {}: {}", id, e);
                requested
            }
        };

        let subscription = RemoteSubscription::established(id, target, callback_urls, requested, actual, callback);
        self.client.registry().add_remote_subscription(subscription.clone());
        self.client.notify_established(&subscription);

        debug!("Subscription {} established for {}s", subscription.id(), actual);
        Ok(subscription)
    }
}
