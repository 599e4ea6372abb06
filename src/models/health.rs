use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::circuit_breaker::CircuitState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub checks: BTreeMap<String, DependencyHealth>,
}

impl HealthReport {
    pub fn from_checks(checks: BTreeMap<String, DependencyHealth>) -> Self {
        let status = checks
            .values()
            .map(|check| check.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            timestamp: Utc::now(),
            checks,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyHealth {
    pub status: HealthStatus,

    #[serde(rename = "circuit_breaker")]
    pub circuit: CircuitState,

    #[serde(rename = "response_time_ms", skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DependencyHealth {
    pub fn reachable(circuit: CircuitState, latency_ms: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            circuit,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn unreachable(circuit: CircuitState, error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            circuit,
            latency_ms: None,
            error: Some(error.into()),
        }
    }

    pub fn tripped(circuit: CircuitState) -> Self {
        let error = match circuit {
            CircuitState::HalfOpen => Some("Circuit breaker in recovery mode".to_string()),
            _ => None,
        };

        Self {
            status: HealthStatus::Degraded,
            circuit,
            latency_ms: None,
            error,
        }
    }
}
