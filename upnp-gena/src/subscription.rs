//! Remote GENA subscription state
//!
//! A [`RemoteSubscription`] is created by a successful SUBSCRIBE and moves
//! through `Established → Renewing → {Established, Ended}`. `Ended` is
//! terminal and remembers why the subscription stopped.

use crate::error::{GenaError, Result};
use crate::message::headers::INFINITE_DURATION;
use crate::message::ResponseStatus;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use upnp_descriptor::Service;
use upnp_types::{ServiceType, Udn};
use url::Url;

/// Why a subscription ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// No response or a failure response to a renewal request
    RenewalFailed,
    /// Explicitly cancelled by the control point
    Unsubscribed,
    /// The granted duration passed without renewal
    Expired,
    /// The publishing device left the network
    DeviceWasRemoved,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CancelReason::RenewalFailed => "renewal failed",
            CancelReason::Unsubscribed => "unsubscribed",
            CancelReason::Expired => "expired",
            CancelReason::DeviceWasRemoved => "device was removed",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Established,
    Renewing,
    Ended(CancelReason),
}

impl SubscriptionStatus {
    pub fn is_ended(&self) -> bool {
        matches!(self, SubscriptionStatus::Ended(_))
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionStatus::Established => f.write_str("established"),
            SubscriptionStatus::Renewing => f.write_str("renewing"),
            SubscriptionStatus::Ended(reason) => write!(f, "ended ({reason})"),
        }
    }
}

/// Result of checking an incoming event's `SEQ` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceCheck {
    /// The next expected event (or the first one)
    InOrder,
    /// Events were skipped; carries how many
    Missed(u32),
    /// Duplicate or out-of-order event; the sequence is not advanced
    Stale,
}

/// Receives lifecycle notifications for a subscription.
///
/// Calls never happen on the thread performing the network exchange; they are
/// dispatched through a [`crate::ListenerExecutor`].
pub trait SubscriptionCallback: Send + Sync {
    fn established(&self, subscription: &RemoteSubscription);

    /// `response` carries the device's status when the end was caused by a response.
    fn ended(&self, subscription: &RemoteSubscription, reason: CancelReason, response: Option<&ResponseStatus>);

    fn events_missed(&self, subscription: &RemoteSubscription, missed: u32) {
        let _ = (subscription, missed);
    }
}

/// The publisher side of a subscription: which service on which device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTarget {
    udn: Udn,
    service_type: ServiceType,
    event_subscription_url: Url,
    evented_variables: Vec<String>,
}

impl SubscriptionTarget {
    pub fn new(udn: Udn, service_type: ServiceType, event_subscription_url: Url) -> Self {
        Self {
            udn,
            service_type,
            event_subscription_url,
            evented_variables: Vec::new(),
        }
    }

    /// Target a described service, remembering which of its variables are evented.
    pub fn for_service(udn: Udn, service: &Service, event_subscription_url: Url) -> Self {
        Self {
            udn,
            service_type: service.service_type().clone(),
            event_subscription_url,
            evented_variables: service
                .evented_state_variables()
                .map(|variable| variable.name().to_string())
                .collect(),
        }
    }

    pub fn udn(&self) -> &Udn {
        &self.udn
    }

    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    pub fn event_subscription_url(&self) -> &Url {
        &self.event_subscription_url
    }

    /// Names of the state variables published to subscribers, empty when unknown.
    pub fn evented_variables(&self) -> &[String] {
        &self.evented_variables
    }
}

/// A subscription held by this control point on a remote service.
#[derive(Clone)]
pub struct RemoteSubscription {
    id: String,
    target: SubscriptionTarget,
    callback_urls: Vec<Url>,
    requested_duration_seconds: u32,
    actual_duration_seconds: u32,
    current_sequence: Option<u32>,
    status: SubscriptionStatus,
    last_renewed: Instant,
    callback: Arc<dyn SubscriptionCallback>,
}

impl RemoteSubscription {
    /// A subscription the device just granted.
    pub fn established(
        id: impl Into<String>,
        target: SubscriptionTarget,
        callback_urls: Vec<Url>,
        requested_duration_seconds: u32,
        actual_duration_seconds: u32,
        callback: Arc<dyn SubscriptionCallback>,
    ) -> Self {
        Self {
            id: id.into(),
            target,
            callback_urls,
            requested_duration_seconds,
            actual_duration_seconds,
            current_sequence: None,
            status: SubscriptionStatus::Established,
            last_renewed: Instant::now(),
            callback,
        }
    }

    /// The `SID` assigned by the device.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> &SubscriptionTarget {
        &self.target
    }

    pub fn udn(&self) -> &Udn {
        self.target.udn()
    }

    pub fn service_type(&self) -> &ServiceType {
        self.target.service_type()
    }

    pub fn event_subscription_url(&self) -> &Url {
        self.target.event_subscription_url()
    }

    pub fn callback_urls(&self) -> &[Url] {
        &self.callback_urls
    }

    pub fn requested_duration_seconds(&self) -> u32 {
        self.requested_duration_seconds
    }

    pub fn actual_duration_seconds(&self) -> u32 {
        self.actual_duration_seconds
    }

    pub fn current_sequence(&self) -> Option<u32> {
        self.current_sequence
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_ended()
    }

    pub fn callback(&self) -> &Arc<dyn SubscriptionCallback> {
        &self.callback
    }

    /// When the granted duration runs out; `None` for infinite subscriptions.
    pub fn expires_at(&self) -> Option<Instant> {
        if self.actual_duration_seconds == INFINITE_DURATION {
            return None;
        }
        self.last_renewed
            .checked_add(Duration::from_secs(u64::from(self.actual_duration_seconds)))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at().is_some_and(|expires_at| now >= expires_at)
    }

    /// Time left before renewal is due, `None` while outside `threshold` or ended.
    pub fn time_until_renewal(&self, now: Instant, threshold: Duration) -> Option<Duration> {
        if !self.is_active() {
            return None;
        }
        let expires_at = self.expires_at()?;
        let remaining = expires_at.saturating_duration_since(now);
        (remaining <= threshold).then_some(remaining)
    }

    pub fn needs_renewal(&self, now: Instant, threshold: Duration) -> bool {
        self.time_until_renewal(now, threshold).is_some()
    }

    /// `Established → Renewing`.
    pub fn begin_renewal(&mut self) -> Result<()> {
        match self.status {
            SubscriptionStatus::Established => {
                self.status = SubscriptionStatus::Renewing;
                Ok(())
            }
            status => Err(GenaError::InvalidState {
                subscription_id: self.id.clone(),
                status,
            }),
        }
    }

    /// `Renewing → Established` with the newly granted duration.
    pub fn complete_renewal(&mut self, actual_duration_seconds: u32, now: Instant) {
        if self.status == SubscriptionStatus::Renewing {
            self.status = SubscriptionStatus::Established;
        }
        self.actual_duration_seconds = actual_duration_seconds;
        self.last_renewed = now;
    }

    /// Move to `Ended`. Returns `false` if the subscription had already ended,
    /// in which case the first reason is kept.
    pub fn end(&mut self, reason: CancelReason) -> bool {
        if self.status.is_ended() {
            return false;
        }
        self.status = SubscriptionStatus::Ended(reason);
        true
    }

    /// Track the `SEQ` of an incoming event.
    ///
    /// After `u32::MAX` the publisher wraps to 1, never to 0.
    pub fn receive_sequence(&mut self, sequence: u32) -> SequenceCheck {
        let check = match self.current_sequence {
            None => SequenceCheck::InOrder,
            Some(current) if current == u32::MAX && sequence == 1 => SequenceCheck::InOrder,
            Some(current) if sequence <= current => return SequenceCheck::Stale,
            Some(current) => match sequence - current - 1 {
                0 => SequenceCheck::InOrder,
                missed => SequenceCheck::Missed(missed),
            },
        };
        self.current_sequence = Some(sequence);
        check
    }
}

impl fmt::Debug for RemoteSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSubscription")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("callback_urls", &self.callback_urls)
            .field("requested_duration_seconds", &self.requested_duration_seconds)
            .field("actual_duration_seconds", &self.actual_duration_seconds)
            .field("current_sequence", &self.current_sequence)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upnp_descriptor::{Datatype, SpecVersion, StateVariable};

    struct Silent;

    impl SubscriptionCallback for Silent {
        fn established(&self, _subscription: &RemoteSubscription) {}
        fn ended(&self, _subscription: &RemoteSubscription, _reason: CancelReason, _response: Option<&ResponseStatus>) {}
    }

    fn target() -> SubscriptionTarget {
        SubscriptionTarget::new(
            Udn::new("RINCON_000E58A0123456").unwrap(),
            ServiceType::uda("RenderingControl", 1).unwrap(),
            Url::parse("http://192.168.1.100:1400/MediaRenderer/RenderingControl/Event").unwrap(),
        )
    }

    fn subscription(actual_duration_seconds: u32) -> RemoteSubscription {
        RemoteSubscription::established("uuid:sub-1", target(), Vec::new(), 1800, actual_duration_seconds, Arc::new(Silent))
    }

    #[test]
    fn test_renewal_transitions() {
        let mut sub = subscription(1800);
        assert_eq!(sub.status(), SubscriptionStatus::Established);

        sub.begin_renewal().unwrap();
        assert_eq!(sub.status(), SubscriptionStatus::Renewing);

        let err = sub.begin_renewal().unwrap_err();
        assert!(matches!(err, GenaError::InvalidState { status: SubscriptionStatus::Renewing, .. }));

        sub.complete_renewal(900, Instant::now());
        assert_eq!(sub.status(), SubscriptionStatus::Established);
        assert_eq!(sub.actual_duration_seconds(), 900);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut sub = subscription(1800);
        assert!(sub.end(CancelReason::Expired));
        assert!(!sub.end(CancelReason::Unsubscribed));
        assert_eq!(sub.status(), SubscriptionStatus::Ended(CancelReason::Expired));
        assert!(!sub.is_active());
        assert!(sub.begin_renewal().is_err());
    }

    #[test]
    fn test_expiry_and_renewal_window() {
        let sub = subscription(600);
        let now = Instant::now();
        let threshold = Duration::from_secs(300);

        assert!(!sub.is_expired(now));
        assert!(!sub.needs_renewal(now, threshold));
        assert!(sub.needs_renewal(now + Duration::from_secs(400), threshold));
        assert!(sub.is_expired(now + Duration::from_secs(601)));
        assert_eq!(
            sub.time_until_renewal(now + Duration::from_secs(700), threshold),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_infinite_subscription_never_expires() {
        let sub = subscription(INFINITE_DURATION);
        assert_eq!(sub.expires_at(), None);
        assert!(!sub.is_expired(Instant::now() + Duration::from_secs(86_400 * 365)));
        assert!(!sub.needs_renewal(Instant::now(), Duration::from_secs(300)));
    }

    #[test]
    fn test_sequence_tracking() {
        let mut sub = subscription(1800);
        assert_eq!(sub.receive_sequence(0), SequenceCheck::InOrder);
        assert_eq!(sub.receive_sequence(1), SequenceCheck::InOrder);
        assert_eq!(sub.receive_sequence(5), SequenceCheck::Missed(3));
        assert_eq!(sub.receive_sequence(5), SequenceCheck::Stale);
        assert_eq!(sub.receive_sequence(2), SequenceCheck::Stale);
        assert_eq!(sub.current_sequence(), Some(5));
    }

    #[test]
    fn test_sequence_wraps_to_one() {
        let mut sub = subscription(1800);
        sub.receive_sequence(u32::MAX);
        assert_eq!(sub.receive_sequence(1), SequenceCheck::InOrder);
        assert_eq!(sub.current_sequence(), Some(1));
    }

    #[test]
    fn test_target_for_service() {
        let service = Service::new(
            ServiceType::uda("RenderingControl", 1).unwrap(),
            SpecVersion::default(),
            Vec::new(),
            vec![
                StateVariable::new("LastChange", Datatype::String).with_send_events(true),
                StateVariable::new("Volume", Datatype::Ui2),
            ],
        );
        let target = SubscriptionTarget::for_service(
            Udn::new("RINCON_1").unwrap(),
            &service,
            Url::parse("http://192.168.1.100:1400/Event").unwrap(),
        );
        assert_eq!(target.evented_variables(), &["LastChange".to_string()]);
        assert_eq!(target.service_type(), service.service_type());
    }
}
