//! Configuration for GENA subscriptions

use crate::error::{GenaError, Result};
use std::time::Duration;

/// Configuration for a [`crate::GenaClient`]
#[derive(Debug, Clone)]
pub struct GenaConfig {
    /// Duration asked for in the `TIMEOUT` header of SUBSCRIBE and renewals
    /// Default: 1800 seconds (30 minutes)
    pub requested_duration_seconds: u32,

    /// Renew once the remaining lifetime falls under this
    /// Default: 5 minutes
    pub renewal_threshold: Duration,

    /// Requested durations are raised to at least this
    /// Default: 60 seconds
    pub minimum_duration_seconds: u32,

    /// Sent as `USER-AGENT` on SUBSCRIBE; empty to omit
    pub user_agent: String,
}

impl Default for GenaConfig {
    fn default() -> Self {
        Self {
            requested_duration_seconds: 1800,
            renewal_threshold: Duration::from_secs(300),
            minimum_duration_seconds: 60,
            user_agent: format!("upnp-gena/{} UPnP/1.1", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GenaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short-lived subscriptions renewed often
    pub fn short_lived() -> Self {
        Self {
            requested_duration_seconds: 300,
            renewal_threshold: Duration::from_secs(60),
            ..Default::default()
        }
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<()> {
        if self.minimum_duration_seconds == 0 {
            return Err(GenaError::Configuration(
                "Minimum subscription duration must be greater than 0".to_string(),
            ));
        }

        if self.requested_duration_seconds < self.minimum_duration_seconds {
            return Err(GenaError::Configuration(format!(
                "Requested duration {}s is below the minimum of {}s",
                self.requested_duration_seconds, self.minimum_duration_seconds
            )));
        }

        if self.renewal_threshold >= Duration::from_secs(u64::from(self.requested_duration_seconds)) {
            return Err(GenaError::Configuration(
                "Renewal threshold must be shorter than the requested duration".to_string(),
            ));
        }

        Ok(())
    }

    /// The duration to request, never below the configured minimum.
    pub fn effective_duration_seconds(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.requested_duration_seconds)
            .max(self.minimum_duration_seconds)
    }

    pub fn with_requested_duration(mut self, seconds: u32) -> Self {
        self.requested_duration_seconds = seconds;
        self
    }

    pub fn with_renewal_threshold(mut self, threshold: Duration) -> Self {
        self.renewal_threshold = threshold;
        self
    }

    pub fn with_minimum_duration(mut self, seconds: u32) -> Self {
        self.minimum_duration_seconds = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
