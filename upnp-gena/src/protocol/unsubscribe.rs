use crate::client::GenaClient;
use crate::message::{StreamRequestMessage, StreamResponseMessage};
use crate::subscription::{CancelReason, RemoteSubscription};
use tracing::{debug, warn};

/// Cancels a subscription.
///
/// The subscription ends with [`CancelReason::Unsubscribed`] whatever the
/// device answers. Cancelling an ended subscription does nothing.
pub struct SendingUnsubscribe<'a> {
    client: &'a GenaClient,
}

impl<'a> SendingUnsubscribe<'a> {
    pub fn new(client: &'a GenaClient) -> Self {
        Self { client }
    }

    pub fn execute(&self, subscription: &mut RemoteSubscription) -> Option<StreamResponseMessage> {
        if !subscription.is_active() {
            debug!("Subscription {} already {}, not unsubscribing", subscription.id(), subscription.status());
            return None;
        }

        let request = StreamRequestMessage::unsubscribe(
            subscription.event_subscription_url().clone(),
            subscription.id(),
        );

        debug!("Sending unsubscribe request for {}", subscription.id());
        let response = self.client.router().send(&request);

        match &response {
            None => warn!("No response to unsubscribe of {}", subscription.id()),
            Some(response) if response.is_failed() => {
                warn!("Unsubscribe of {} failed: {}", subscription.id(), response.status())
            }
            Some(_) => {}
        }

        subscription.end(CancelReason::Unsubscribed);
        self.client.registry().remove_remote_subscription(subscription.id());
        self.client.notify_ended(
            subscription,
            CancelReason::Unsubscribed,
            response.as_ref().map(|response| response.status().clone()),
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{GenaMethod, ResponseStatus};
    use crate::protocol::test_support::{Harness, Notification};
    use crate::registry::SubscriptionRegistry;
    use crate::router::MockRouter;

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let mut router = MockRouter::new();
        router
            .expect_send()
            .withf(|request| request.method() == GenaMethod::Unsubscribe && request.subscription_id() == Some("sub-1"))
            .times(1)
            .returning(|_| Some(StreamResponseMessage::new(ResponseStatus::ok())));
        let harness = Harness::new(router);
        let mut subscription = harness.registered("sub-1");

        let unsubscribe = SendingUnsubscribe::new(&harness.client);
        assert!(unsubscribe.execute(&mut subscription).is_some());
        assert!(unsubscribe.execute(&mut subscription).is_none());

        assert!(harness.registry.remote_subscription("sub-1").is_none());
        assert_eq!(harness.executor.run_all(), 1);
        assert_eq!(
            harness.notifications(),
            vec![Notification::Ended(
                "sub-1".to_string(),
                CancelReason::Unsubscribed,
                Some(ResponseStatus::ok())
            )]
        );
    }

    #[test]
    fn test_unsubscribe_without_response_still_ends() {
        let mut router = MockRouter::new();
        router.expect_send().returning(|_| None);
        let harness = Harness::new(router);
        let mut subscription = harness.registered("sub-1");

        assert!(SendingUnsubscribe::new(&harness.client).execute(&mut subscription).is_none());
        assert!(!subscription.is_active());
        assert!(harness.registry.is_empty());

        harness.executor.run_all();
        assert_eq!(
            harness.notifications(),
            vec![Notification::Ended("sub-1".to_string(), CancelReason::Unsubscribed, None)]
        );
    }
}
