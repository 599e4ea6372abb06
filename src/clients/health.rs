use std::{collections::BTreeMap, sync::Arc};

use tracing::{debug, warn};

use crate::{
    clients::api::ApiClient,
    models::{
        circuit_breaker::CircuitState,
        health::{DependencyHealth, HealthReport},
    },
};

pub struct HealthChecker {
    api_client: Arc<ApiClient>,
}

impl HealthChecker {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }

    pub async fn check_all(&self) -> HealthReport {
        let mut checks = BTreeMap::new();
        checks.insert("platform_api".to_string(), self.check_api().await);

        HealthReport::from_checks(checks)
    }

    async fn check_api(&self) -> DependencyHealth {
        let circuit = self.api_client.circuit_state().await;
        debug!(circuit_state = circuit.as_str(), "Circuit breaker state checked");

        if circuit != CircuitState::Closed {
            return DependencyHealth::tripped(circuit);
        }

        match self.api_client.ping().await {
            Ok(elapsed) => {
                debug!(response_time_ms = elapsed, "Platform API health check passed");
                DependencyHealth::reachable(circuit, elapsed)
            }
            Err(e) => {
                warn!(error = %e, "Platform API health check failed");
                DependencyHealth::unreachable(circuit, e.to_string())
            }
        }
    }
}
