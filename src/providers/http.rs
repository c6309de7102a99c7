//! Shared HTTP plumbing for the provider adapters

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ProviderResult;
use crate::config::ProvidersConfig;
use crate::error::ProviderError;

const USER_AGENT: &str = concat!("TripPlanner/", env!("CARGO_PKG_VERSION"));

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Build the HTTP client shared by all adapters.
///
/// Transient failures are retried with exponential backoff; the configured
/// timeout bounds every single attempt.
pub fn build_client(config: &ProvidersConfig) -> ProviderResult<ClientWithMiddleware> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::Configuration(format!("Failed to create HTTP client: {e}")))?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Send a request and decode a successful JSON response
pub async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> ProviderResult<T> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message: String = body.chars().take(MAX_ERROR_BODY).collect();
        debug!(status = status.as_u16(), "Upstream returned an error status");
        return Err(match status.as_u16() {
            401 | 403 => ProviderError::Configuration(format!(
                "Upstream rejected the API key ({status})"
            )),
            code => ProviderError::Api {
                status: code,
                message,
            },
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Parse(format!("Failed to decode response: {e}")))
}

/// Borrow a configured API key or fail with a configuration error
pub fn require_key<'a>(key: Option<&'a str>, name: &str) -> ProviderResult<&'a str> {
    key.filter(|key| !key.is_empty())
        .ok_or_else(|| ProviderError::Configuration(format!("Missing {name} API key")))
}
