use crate::client::GenaClient;
use crate::subscription::{RemoteSubscription, SequenceCheck};
use tracing::{trace, warn};

/// Record the `SEQ` of an incoming event.
///
/// Skipped events are reported through `events_missed`; stale events leave the
/// subscription untouched.
pub fn receive_event_sequence(
    client: &GenaClient,
    subscription: &mut RemoteSubscription,
    sequence: u32,
) -> SequenceCheck {
    let check = subscription.receive_sequence(sequence);

    match check {
        SequenceCheck::Stale => {
            trace!("Ignoring stale event {} for {}", sequence, subscription.id());
            return check;
        }
        SequenceCheck::Missed(missed) => {
            warn!("Subscription {} missed {} events", subscription.id(), missed);
            client.notify_events_missed(subscription, missed);
        }
        SequenceCheck::InOrder => {}
    }

    client.registry().update_remote_subscription(subscription);
    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::test_support::{Harness, Notification};
    use crate::registry::SubscriptionRegistry;
    use crate::router::MockRouter;

    #[test]
    fn test_missed_events_are_reported() {
        let harness = Harness::new(MockRouter::new());
        let mut subscription = harness.registered("sub-1");

        assert_eq!(receive_event_sequence(&harness.client, &mut subscription, 0), SequenceCheck::InOrder);
        assert_eq!(receive_event_sequence(&harness.client, &mut subscription, 4), SequenceCheck::Missed(3));
        assert_eq!(receive_event_sequence(&harness.client, &mut subscription, 2), SequenceCheck::Stale);

        assert_eq!(harness.registry.remote_subscription("sub-1").unwrap().current_sequence(), Some(4));
        harness.executor.run_all();
        assert_eq!(harness.notifications(), vec![Notification::EventsMissed("sub-1".to_string(), 3)]);
    }
}
