//! Recording collaborators for protocol integration tests

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use upnp_gena::{
    CancelReason, GenaClient, GenaConfig, InMemorySubscriptionRegistry, ListenerExecutor, RemoteSubscription,
    ResponseStatus, Router, StreamRequestMessage, StreamResponseMessage, SubscriptionCallback, SubscriptionRegistry,
    SubscriptionTarget, Task,
};
use upnp_types::{ServiceType, Udn};
use url::Url;

/// Answers requests from a script, in order, and remembers what was sent.
#[derive(Default)]
pub struct ScriptedRouter {
    responses: Mutex<VecDeque<Option<StreamResponseMessage>>>,
    requests: Mutex<Vec<StreamRequestMessage>>,
}

impl ScriptedRouter {
    pub fn with_responses(responses: Vec<Option<StreamResponseMessage>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<StreamRequestMessage> {
        self.requests.lock().clone()
    }
}

impl Router for ScriptedRouter {
    fn send(&self, request: &StreamRequestMessage) -> Option<StreamResponseMessage> {
        self.requests.lock().push(request.clone());
        self.responses.lock().pop_front().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    Add(String),
    Update(String),
    Remove(String),
}

/// In-memory registry that logs every mutation.
#[derive(Default)]
pub struct RecordingRegistry {
    inner: InMemorySubscriptionRegistry,
    calls: Mutex<Vec<RegistryCall>>,
}

impl RecordingRegistry {
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl SubscriptionRegistry for RecordingRegistry {
    fn add_remote_subscription(&self, subscription: RemoteSubscription) {
        self.calls.lock().push(RegistryCall::Add(subscription.id().to_string()));
        self.inner.add_remote_subscription(subscription);
    }

    fn update_remote_subscription(&self, subscription: &RemoteSubscription) -> bool {
        self.calls.lock().push(RegistryCall::Update(subscription.id().to_string()));
        self.inner.update_remote_subscription(subscription)
    }

    fn remove_remote_subscription(&self, id: &str) -> Option<RemoteSubscription> {
        self.calls.lock().push(RegistryCall::Remove(id.to_string()));
        self.inner.remove_remote_subscription(id)
    }

    fn remote_subscription(&self, id: &str) -> Option<RemoteSubscription> {
        self.inner.remote_subscription(id)
    }

    fn remote_subscriptions_for_device(&self, udn: &Udn) -> Vec<RemoteSubscription> {
        self.inner.remote_subscriptions_for_device(udn)
    }

    fn remote_subscriptions(&self) -> Vec<RemoteSubscription> {
        self.inner.remote_subscriptions()
    }
}

/// Holds tasks until `run_all` so tests can observe the ordering.
#[derive(Default)]
pub struct QueuedExecutor {
    queue: Mutex<Vec<Task>>,
}

impl QueuedExecutor {
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn run_all(&self) -> usize {
        let tasks: Vec<Task> = std::mem::take(&mut *self.queue.lock());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl ListenerExecutor for QueuedExecutor {
    fn execute(&self, task: Task) {
        self.queue.lock().push(task);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Established(String),
    Ended {
        id: String,
        reason: CancelReason,
        response: Option<ResponseStatus>,
    },
    EventsMissed(String, u32),
}

#[derive(Default)]
pub struct RecordingCallback {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingCallback {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }
}

impl SubscriptionCallback for RecordingCallback {
    fn established(&self, subscription: &RemoteSubscription) {
        self.notifications
            .lock()
            .push(Notification::Established(subscription.id().to_string()));
    }

    fn ended(&self, subscription: &RemoteSubscription, reason: CancelReason, response: Option<&ResponseStatus>) {
        self.notifications.lock().push(Notification::Ended {
            id: subscription.id().to_string(),
            reason,
            response: response.cloned(),
        });
    }

    fn events_missed(&self, subscription: &RemoteSubscription, missed: u32) {
        self.notifications
            .lock()
            .push(Notification::EventsMissed(subscription.id().to_string(), missed));
    }
}

pub struct TestControlPoint {
    pub client: GenaClient,
    pub router: Arc<ScriptedRouter>,
    pub registry: Arc<RecordingRegistry>,
    pub executor: Arc<QueuedExecutor>,
    pub callback: Arc<RecordingCallback>,
}

impl TestControlPoint {
    pub fn new(responses: Vec<Option<StreamResponseMessage>>) -> Self {
        let router = Arc::new(ScriptedRouter::with_responses(responses));
        let registry = Arc::new(RecordingRegistry::default());
        let executor = Arc::new(QueuedExecutor::default());
        let client = GenaClient::new(router.clone(), registry.clone(), executor.clone(), GenaConfig::default())
            .expect("default config is valid");

        Self {
            client,
            router,
            registry,
            executor,
            callback: Arc::new(RecordingCallback::default()),
        }
    }

    /// Register a subscription as if SUBSCRIBE had just succeeded.
    pub fn register(&self, id: &str, requested: u32, actual: u32) -> RemoteSubscription {
        let subscription = RemoteSubscription::established(
            id,
            target(),
            vec![callback_url()],
            requested,
            actual,
            self.callback.clone(),
        );
        self.registry.add_remote_subscription(subscription.clone());
        self.registry.clear_calls();
        subscription
    }
}

pub fn target() -> SubscriptionTarget {
    SubscriptionTarget::new(
        Udn::new("RINCON_000E58A0123456").unwrap(),
        ServiceType::uda("AVTransport", 1).unwrap(),
        Url::parse("http://192.168.1.100:1400/MediaRenderer/AVTransport/Event").unwrap(),
    )
}

pub fn callback_url() -> Url {
    Url::parse("http://192.168.1.50:3400/notify/av").unwrap()
}

pub fn ok_response(sid: &str, timeout: &str) -> StreamResponseMessage {
    StreamResponseMessage::new(ResponseStatus::ok())
        .with_header("SID", sid)
        .with_header("TIMEOUT", timeout)
}
