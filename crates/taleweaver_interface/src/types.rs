//! Availability and health types shared by all providers.

use serde::{Deserialize, Serialize};

/// Marker returned by a successful availability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Available;

/// Why a provider cannot currently be used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UnavailableReason {
    /// Credentials or required settings are absent
    #[display("not configured: {}", _0)]
    NotConfigured(String),
    /// The provider did not answer
    #[display("unreachable: {}", _0)]
    Unreachable(String),
    /// The provider answered with an error
    #[display("unhealthy: {}", _0)]
    Unhealthy(String),
}

/// Outcome of an availability or health probe.
pub type Probe = Result<Available, UnavailableReason>;

/// Health of a provider as reported on the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HealthStatus {
    /// Provider is configured and answering
    Healthy,
    /// Provider is configured but failed its probe
    Unhealthy {
        /// Description of the problem
        message: String,
    },
    /// Provider has no credentials and is skipped
    Disabled {
        /// Description of what is missing
        message: String,
    },
}

impl HealthStatus {
    /// Whether the provider can serve requests.
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl From<Probe> for HealthStatus {
    fn from(probe: Probe) -> Self {
        match probe {
            Ok(Available) => Self::Healthy,
            Err(UnavailableReason::NotConfigured(message)) => Self::Disabled { message },
            Err(reason) => Self::Unhealthy {
                message: reason.to_string(),
            },
        }
    }
}
