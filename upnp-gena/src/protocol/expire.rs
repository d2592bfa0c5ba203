use crate::client::GenaClient;
use crate::subscription::{CancelReason, RemoteSubscription};
use std::time::Instant;
use tracing::{debug, info};
use upnp_types::Udn;

/// End every registered subscription whose granted duration passed.
pub fn expire_subscriptions(client: &GenaClient, now: Instant) -> Vec<RemoteSubscription> {
    let expired: Vec<RemoteSubscription> = client
        .registry()
        .remote_subscriptions()
        .into_iter()
        .filter(|subscription| subscription.is_expired(now))
        .filter_map(|subscription| end_registered(client, subscription, CancelReason::Expired))
        .collect();

    if !expired.is_empty() {
        info!("Expired {} remote subscriptions", expired.len());
    }
    expired
}

/// End every subscription on a device that left the network.
pub fn remove_device_subscriptions(client: &GenaClient, udn: &Udn) -> Vec<RemoteSubscription> {
    debug!("Removing subscriptions of device {}", udn);
    client
        .registry()
        .remote_subscriptions_for_device(udn)
        .into_iter()
        .filter_map(|subscription| end_registered(client, subscription, CancelReason::DeviceWasRemoved))
        .collect()
}

fn end_registered(
    client: &GenaClient,
    mut subscription: RemoteSubscription,
    reason: CancelReason,
) -> Option<RemoteSubscription> {
    client.registry().remove_remote_subscription(subscription.id());
    if !subscription.end(reason) {
        return None;
    }
    client.notify_ended(&subscription, reason, None);
    Some(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::test_support::{Harness, Notification};
    use crate::registry::SubscriptionRegistry;
    use crate::router::MockRouter;
    use std::time::Duration;

    #[test]
    fn test_expire_only_lapsed_subscriptions() {
        let harness = Harness::new(MockRouter::new());
        harness.registered("sub-1");

        assert!(expire_subscriptions(&harness.client, Instant::now()).is_empty());

        let later = Instant::now() + Duration::from_secs(301);
        let expired = expire_subscriptions(&harness.client, later);
        assert_eq!(expired.len(), 1);
        assert!(harness.registry.is_empty());

        harness.executor.run_all();
        assert_eq!(
            harness.notifications(),
            vec![Notification::Ended("sub-1".to_string(), CancelReason::Expired, None)]
        );
    }

    #[test]
    fn test_remove_device() {
        let harness = Harness::new(MockRouter::new());
        harness.registered("sub-1");
        harness.registered("sub-2");
        let udn = harness.target().udn().clone();

        let removed = remove_device_subscriptions(&harness.client, &udn);
        assert_eq!(removed.len(), 2);
        assert!(harness.registry.remote_subscriptions_for_device(&udn).is_empty());

        assert_eq!(harness.executor.run_all(), 2);
        assert!(harness
            .notifications()
            .iter()
            .all(|n| matches!(n, Notification::Ended(_, CancelReason::DeviceWasRemoved, None))));
    }
}
