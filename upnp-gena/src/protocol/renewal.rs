use crate::client::GenaClient;
use crate::error::{GenaError, Result};
use crate::message::{ResponseStatus, StreamRequestMessage, StreamResponseMessage};
use crate::subscription::{CancelReason, RemoteSubscription};
use std::time::Instant;
use tracing::{debug, warn};

/// Renews a subscription before its granted duration runs out.
///
/// Any failure ends the subscription with [`CancelReason::RenewalFailed`]: it
/// is removed from the registry and its listener is told asynchronously. No
/// retry happens here; a scheduler may subscribe again.
pub struct SendingRenewal<'a> {
    client: &'a GenaClient,
}

impl<'a> SendingRenewal<'a> {
    pub fn new(client: &'a GenaClient) -> Self {
        Self { client }
    }

    /// Returns the device's response on success.
    ///
    /// An ended subscription or one already renewing is refused without
    /// sending anything.
    pub fn execute(&self, subscription: &mut RemoteSubscription) -> Result<StreamResponseMessage> {
        subscription.begin_renewal()?;

        let requested = subscription.requested_duration_seconds();
        let request = StreamRequestMessage::renewal(
            subscription.event_subscription_url().clone(),
            subscription.id(),
            requested,
        );

        debug!("Sending subscription renewal request for {}", subscription.id());

        let Some(response) = self.client.router().send(&request) else {
            warn!("Subscription renewal of {} failed: no response", subscription.id());
            self.fail(subscription, None);
            return Err(GenaError::NoResponse(subscription.event_subscription_url().to_string()));
        };

        if response.is_failed() {
            warn!(
                "Subscription renewal of {} failed: {}",
                subscription.id(),
                response.status()
            );
            self.fail(subscription, Some(response.status().clone()));
            return Err(GenaError::Rejected(response.status().clone()));
        }

        let actual = match response.timeout_seconds() {
            Ok(Some(seconds)) => seconds,
            Ok(None) => requested,
            Err(e) => {
                warn!("Ignoring renewal response header of {}: {}", subscription.id(), e);
                requested
            }
        };

        subscription.complete_renewal(actual, Instant::now());
        if !self.client.registry().update_remote_subscription(subscription) {
            warn!("Renewed subscription {} is not registered", subscription.id());
        }

        debug!("Subscription {} renewed for {}s", subscription.id(), actual);
        Ok(response)
    }

    fn fail(&self, subscription: &mut RemoteSubscription, response: Option<ResponseStatus>) {
        subscription.end(CancelReason::RenewalFailed);
        self.client.registry().remove_remote_subscription(subscription.id());
        self.client
            .notify_ended(subscription, CancelReason::RenewalFailed, response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::headers;
    use crate::protocol::test_support::{Harness, Notification};
    use crate::registry::SubscriptionRegistry;
    use crate::router::MockRouter;
    use crate::subscription::SubscriptionStatus;
    use crate::GenaMethod;
    use mockall::predicate::always;

    #[test]
    fn test_no_response_ends_subscription() {
        let mut router = MockRouter::new();
        router.expect_send().times(1).with(always()).returning(|_| None);
        let harness = Harness::new(router);
        let mut subscription = harness.registered("sub-1");

        let err = SendingRenewal::new(&harness.client)
            .execute(&mut subscription)
            .unwrap_err();

        assert!(matches!(err, GenaError::NoResponse(_)));
        assert_eq!(subscription.status(), SubscriptionStatus::Ended(CancelReason::RenewalFailed));
        assert!(harness.registry.remote_subscription("sub-1").is_none());

        // Notification is queued, not yet delivered
        assert!(harness.notifications().is_empty());
        assert_eq!(harness.executor.run_all(), 1);
        assert_eq!(
            harness.notifications(),
            vec![Notification::Ended("sub-1".to_string(), CancelReason::RenewalFailed, None)]
        );
    }

    #[test]
    fn test_failure_status_is_attached() {
        let mut router = MockRouter::new();
        router
            .expect_send()
            .returning(|_| Some(StreamResponseMessage::new(ResponseStatus::new(412, "Precondition Failed"))));
        let harness = Harness::new(router);
        let mut subscription = harness.registered("sub-1");

        let err = SendingRenewal::new(&harness.client)
            .execute(&mut subscription)
            .unwrap_err();

        assert!(matches!(err, GenaError::Rejected(ref status) if status.status_code == 412));
        harness.executor.run_all();
        assert_eq!(
            harness.notifications(),
            vec![Notification::Ended(
                "sub-1".to_string(),
                CancelReason::RenewalFailed,
                Some(ResponseStatus::new(412, "Precondition Failed"))
            )]
        );
    }

    #[test]
    fn test_success_updates_duration() {
        let mut router = MockRouter::new();
        router
            .expect_send()
            .withf(|request| {
                request.method() == GenaMethod::Subscribe
                    && request.subscription_id() == Some("sub-1")
                    && request.headers().get(headers::TIMEOUT) == Some("Second-1800")
                    && !request.headers().contains(headers::CALLBACK)
            })
            .times(1)
            .returning(|_| {
                Some(
                    StreamResponseMessage::new(ResponseStatus::ok())
                        .with_header(headers::SID, "sub-1")
                        .with_header(headers::TIMEOUT, "Second-1800"),
                )
            });
        let harness = Harness::new(router);
        let mut subscription = harness.registered("sub-1");
        assert_eq!(subscription.actual_duration_seconds(), 300);

        let response = SendingRenewal::new(&harness.client)
            .execute(&mut subscription)
            .unwrap();

        assert_eq!(response.status().status_code, 200);
        assert_eq!(subscription.actual_duration_seconds(), 1800);
        assert_eq!(subscription.status(), SubscriptionStatus::Established);
        assert_eq!(
            harness.registry.remote_subscription("sub-1").unwrap().actual_duration_seconds(),
            1800
        );
        assert_eq!(harness.executor.pending(), 0);
    }

    #[test]
    fn test_missing_timeout_falls_back_to_requested() {
        let mut router = MockRouter::new();
        router
            .expect_send()
            .returning(|_| Some(StreamResponseMessage::new(ResponseStatus::ok())));
        let harness = Harness::new(router);
        let mut subscription = harness.registered("sub-1");

        SendingRenewal::new(&harness.client).execute(&mut subscription).unwrap();
        assert_eq!(subscription.actual_duration_seconds(), 1800);
    }

    #[test]
    fn test_ended_subscription_is_not_renewed() {
        let mut router = MockRouter::new();
        router.expect_send().times(0);
        let harness = Harness::new(router);
        let mut subscription = harness.registered("sub-1");
        subscription.end(CancelReason::Unsubscribed);

        let err = SendingRenewal::new(&harness.client)
            .execute(&mut subscription)
            .unwrap_err();
        assert!(matches!(err, GenaError::InvalidState { .. }));
        assert_eq!(harness.executor.pending(), 0);
    }
}
