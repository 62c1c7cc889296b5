//! Shared HTTP plumbing for the remote service gateways.

use muse_common::{AppError, config::GatewayConfig};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Error type for gateway HTTP operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("{endpoint} returned {status}: {body}")]
    RemoteFailed {
        endpoint: String,
        status: u16,
        body: String,
    },
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        Self::Gateway(e.to_string())
    }
}

/// Build the HTTP client both gateways share, with the configured
/// timeouts.
pub(crate) fn build_client(config: &GatewayConfig) -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .map_err(GatewayError::Http)
}

/// Validate a configured base url and strip any trailing slash, so
/// endpoints can be appended with a plain format.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String, GatewayError> {
    Url::parse(raw).map_err(|e| GatewayError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    Ok(raw.trim_end_matches('/').to_string())
}

/// Reject non-2xx responses, logging the remote's status and body.
pub(crate) async fn ensure_success(
    endpoint: &str,
    response: Response,
) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(
        endpoint = %endpoint,
        status = %status,
        body = %body,
        "Remote service call failed"
    );
    Err(GatewayError::RemoteFailed {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}
