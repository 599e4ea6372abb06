use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    errors::{TemplateError, TemplateResult},
    models::circuit_breaker::{CircuitBreakerConfig, CircuitState},
};

#[derive(Debug)]
struct Counters {
    state: CircuitState,
    failures: u32,
    successes: u32,
    opened_at: Option<Instant>,
}

pub struct CircuitBreaker {
    service_name: String,
    config: CircuitBreakerConfig,
    counters: Mutex<Counters>,
}

impl CircuitBreaker {
    pub fn new(service_name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        let service_name = service_name.into();
        info!(service = %service_name, "Circuit breaker initialized");

        Self {
            service_name,
            config,
            counters: Mutex::new(Counters {
                state: CircuitState::Closed,
                failures: 0,
                successes: 0,
                opened_at: None,
            }),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub async fn state(&self) -> CircuitState {
        self.counters.lock().await.state
    }

    pub async fn call<F, Fut, T>(&self, operation: F) -> TemplateResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = TemplateResult<T>>,
    {
        self.before_call().await?;

        let result = operation().await;
        match &result {
            Ok(_) => self.record_success().await,
            // Answers from a reachable API do not count against it.
            Err(e) if e.is_transient() => self.record_failure().await,
            Err(_) => self.record_success().await,
        }

        result
    }

    async fn before_call(&self) -> TemplateResult<()> {
        let mut counters = self.counters.lock().await;

        match counters.state {
            CircuitState::Closed => Ok(()),
            CircuitState::HalfOpen => {
                debug!(service = %self.service_name, "Circuit breaker in half-open state");
                Ok(())
            }
            CircuitState::Open => {
                let timeout = Duration::from_secs(self.config.timeout_seconds);
                let elapsed = counters
                    .opened_at
                    .map(|opened_at| opened_at.elapsed() >= timeout)
                    .unwrap_or(true);

                if elapsed {
                    info!(service = %self.service_name, "Circuit breaker attempting reset");
                    counters.state = CircuitState::HalfOpen;
                    counters.successes = 0;
                    Ok(())
                } else {
                    warn!(service = %self.service_name, "Circuit breaker is open, rejecting request");
                    Err(TemplateError::CircuitOpen(self.service_name.clone()))
                }
            }
        }
    }

    async fn record_success(&self) {
        let mut counters = self.counters.lock().await;

        match counters.state {
            CircuitState::HalfOpen => {
                counters.successes += 1;
                debug!(
                    service = %self.service_name,
                    successes = counters.successes,
                    threshold = self.config.success_threshold,
                    "Circuit breaker success recorded"
                );

                if counters.successes >= self.config.success_threshold {
                    counters.state = CircuitState::Closed;
                    counters.failures = 0;
                    counters.successes = 0;
                    counters.opened_at = None;
                    info!(service = %self.service_name, "Circuit breaker closed after successful recovery");
                }
            }
            CircuitState::Closed => counters.failures = 0,
            CircuitState::Open => {}
        }
    }

    async fn record_failure(&self) {
        let mut counters = self.counters.lock().await;

        if counters.state == CircuitState::HalfOpen {
            counters.state = CircuitState::Open;
            counters.opened_at = Some(Instant::now());
            warn!(service = %self.service_name, "Circuit breaker reopened after failed recovery attempt");
            return;
        }

        counters.failures += 1;
        debug!(
            service = %self.service_name,
            failures = counters.failures,
            threshold = self.config.failure_threshold,
            "Circuit breaker failure recorded"
        );

        if counters.failures >= self.config.failure_threshold {
            counters.state = CircuitState::Open;
            counters.opened_at = Some(Instant::now());
            warn!(
                service = %self.service_name,
                failures = counters.failures,
                "Circuit breaker opened due to consecutive failures"
            );
        }
    }
}
