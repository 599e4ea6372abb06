use std::sync::Arc;

use anyhow::{Error, Result, anyhow};
use template_service::{api::run_api_server, clients::api::ApiClient, config::Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let api_client = Arc::new(ApiClient::new(&config)?);

    run_api_server(config, api_client)
        .await
        .map_err(|e| anyhow!("Server failed: {}", e))?;

    Ok(())
}
