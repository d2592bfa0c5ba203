//! Bookkeeping of active remote subscriptions.

use crate::subscription::RemoteSubscription;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use upnp_types::Udn;

/// Where the control point keeps its active subscriptions.
pub trait SubscriptionRegistry: Send + Sync {
    fn add_remote_subscription(&self, subscription: RemoteSubscription);

    /// Replace the stored state of the subscription with the same id.
    /// Returns `false` when no such subscription is registered.
    fn update_remote_subscription(&self, subscription: &RemoteSubscription) -> bool;

    fn remove_remote_subscription(&self, id: &str) -> Option<RemoteSubscription>;

    fn remote_subscription(&self, id: &str) -> Option<RemoteSubscription>;

    fn remote_subscriptions_for_device(&self, udn: &Udn) -> Vec<RemoteSubscription>;

    fn remote_subscriptions(&self) -> Vec<RemoteSubscription>;
}

#[derive(Default)]
struct Inner {
    by_id: HashMap<String, RemoteSubscription>,
    by_device: HashMap<Udn, Vec<String>>,
}

impl Inner {
    fn unindex_device(&mut self, udn: &Udn, id: &str) {
        if let Some(ids) = self.by_device.get_mut(udn) {
            ids.retain(|candidate| candidate != id);
            if ids.is_empty() {
                self.by_device.remove(udn);
            }
        }
    }
}

/// Registry indexed by subscription id and by device.
#[derive(Default)]
pub struct InMemorySubscriptionRegistry {
    inner: RwLock<Inner>,
}

impl InMemorySubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }
}

impl SubscriptionRegistry for InMemorySubscriptionRegistry {
    fn add_remote_subscription(&self, subscription: RemoteSubscription) {
        let mut inner = self.inner.write();
        let id = subscription.id().to_string();
        let udn = subscription.udn().clone();

        debug!("Registering remote subscription {} for {}", id, udn);

        if let Some(previous) = inner.by_id.insert(id.clone(), subscription) {
            if previous.udn() == &udn {
                return;
            }
            inner.unindex_device(previous.udn(), &id);
        }
        inner.by_device.entry(udn).or_default().push(id);
    }

    fn update_remote_subscription(&self, subscription: &RemoteSubscription) -> bool {
        let mut inner = self.inner.write();
        let Some(stored) = inner.by_id.get_mut(subscription.id()) else {
            return false;
        };
        let previous = std::mem::replace(stored, subscription.clone());

        if previous.udn() != subscription.udn() {
            inner.unindex_device(previous.udn(), subscription.id());
            inner
                .by_device
                .entry(subscription.udn().clone())
                .or_default()
                .push(subscription.id().to_string());
        }
        true
    }

    fn remove_remote_subscription(&self, id: &str) -> Option<RemoteSubscription> {
        let mut inner = self.inner.write();
        let removed = inner.by_id.remove(id)?;
        inner.unindex_device(removed.udn(), id);

        debug!("Removed remote subscription {}", id);
        Some(removed)
    }

    fn remote_subscription(&self, id: &str) -> Option<RemoteSubscription> {
        self.inner.read().by_id.get(id).cloned()
    }

    fn remote_subscriptions_for_device(&self, udn: &Udn) -> Vec<RemoteSubscription> {
        let inner = self.inner.read();
        inner
            .by_device
            .get(udn)
            .map(|ids| ids.iter().filter_map(|id| inner.by_id.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    fn remote_subscriptions(&self) -> Vec<RemoteSubscription> {
        self.inner.read().by_id.values().cloned().collect()
    }
}
