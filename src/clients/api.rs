use std::time::{Duration, Instant};

use anyhow::{Error, Result, anyhow};
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::{
    clients::circuit_breaker::CircuitBreaker,
    config::Config,
    errors::{TemplateError, TemplateResult},
    models::{circuit_breaker::CircuitState, response::ApiResponse, retry::RetryConfig},
    utils::retry_with_backoff_if,
};

pub struct ApiClient {
    http_client: Client,
    base_url: String,
    retry_config: RetryConfig,
    circuit_breaker: CircuitBreaker,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        let base_url = config.api_base_url.trim_end_matches('/').to_string();

        info!(base_url = %base_url, "API client initialized");

        Ok(Self {
            http_client,
            base_url,
            retry_config: config.retry_config(),
            circuit_breaker: CircuitBreaker::new("platform_api", config.circuit_breaker_config()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state().await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> TemplateResult<T> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> TemplateResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> TemplateResult<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TemplateResult<()> {
        self.envelope::<(), serde_json::Value>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    pub async fn ping(&self) -> Result<u64, Error> {
        let start = Instant::now();
        let url = format!("{}/health", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("API unreachable: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("API health returned status {}", response.status()));
        }

        Ok(start.elapsed().as_millis() as u64)
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> TemplateResult<T> {
        let envelope = self.envelope::<B, T>(method, path, body).await?;

        envelope
            .data
            .ok_or_else(|| TemplateError::Api("response envelope carried no data".to_string()))
    }

    async fn envelope<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> TemplateResult<ApiResponse<T>> {
        let url = format!("{}{}", self.base_url, path);
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| TemplateError::Api(format!("Failed to encode request body: {}", e)))?;

        debug!(method = %method, url = %url, "Sending API request");

        self.circuit_breaker
            .call(|| {
                retry_with_backoff_if(
                    &self.retry_config,
                    || self.send_once::<T>(method.clone(), url.clone(), body.clone()),
                    TemplateError::is_transient,
                )
            })
            .await
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<serde_json::Value>,
    ) -> TemplateResult<ApiResponse<T>> {
        let mut request = self.http_client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TemplateError::Transport(e.to_string()))?;

        let status = response.status();

        if status.is_server_error() {
            warn!(url = %url, status = %status, "API returned server error");
            return Err(TemplateError::Transport(format!(
                "API returned status {}",
                status
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TemplateError::Transport(e.to_string()))?;

        if status.is_success() && text.trim().is_empty() {
            return Ok(ApiResponse {
                success: true,
                data: None,
                error: None,
                message: None,
            });
        }

        let envelope = serde_json::from_str::<ApiResponse<T>>(&text);

        match (status, envelope) {
            (status, Ok(envelope)) if status.is_success() => {
                if envelope.success {
                    Ok(envelope)
                } else {
                    Err(TemplateError::Api(envelope.failure_reason()))
                }
            }
            (status, Ok(envelope)) => Err(status_error(status, envelope.failure_reason())),
            (status, Err(_)) if !status.is_success() => Err(status_error(status, text)),
            (_, Err(e)) => Err(TemplateError::Api(format!(
                "Failed to parse response envelope: {}",
                e
            ))),
        }
    }
}

fn status_error(status: StatusCode, message: String) -> TemplateError {
    match status {
        StatusCode::FORBIDDEN => TemplateError::Forbidden(message),
        _ => TemplateError::Status {
            status: status.as_u16(),
            message,
        },
    }
}
