//! Server configuration.

use std::time::Duration;

use clap::ValueEnum;

use crate::domain::{ExpiryPolicy, policy::DEFAULT_ROOM_MAX_AGE};

/// Default interval of the background sweeper
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Which timestamp the expiry threshold is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExpiryPolicyKind {
    /// Measured from room creation, regardless of activity
    Absolute,
    /// Measured from the last create/join/send-message or effective leave
    Idle,
}

impl ExpiryPolicyKind {
    pub fn with_threshold(self, threshold: Duration) -> ExpiryPolicy {
        match self {
            Self::Absolute => ExpiryPolicy::Absolute(threshold),
            Self::Idle => ExpiryPolicy::Idle(threshold),
        }
    }
}

/// Runtime configuration of the room server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub expiry_policy: ExpiryPolicy,
    /// `None` disables the background sweeper; the per-request sweep always runs
    pub sweep_interval: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            expiry_policy: ExpiryPolicy::Absolute(DEFAULT_ROOM_MAX_AGE),
            sweep_interval: Some(DEFAULT_SWEEP_INTERVAL),
        }
    }
}

impl ServerConfig {
    /// Build a configuration from raw command-line values
    ///
    /// A zero sweep interval disables the background sweeper.
    pub fn from_parts(
        host: String,
        port: u16,
        policy_kind: ExpiryPolicyKind,
        room_max_age_secs: u64,
        sweep_interval_secs: u64,
    ) -> Self {
        Self {
            host,
            port,
            expiry_policy: policy_kind.with_threshold(Duration::from_secs(room_max_age_secs)),
            sweep_interval: (sweep_interval_secs > 0)
                .then(|| Duration::from_secs(sweep_interval_secs)),
        }
    }
}
