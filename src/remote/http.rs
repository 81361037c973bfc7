use reqwest::{Client, Response};
use serde::Deserialize;

use crate::config::MarketConfig;

// ============================================================================
// Remote Transport
// ============================================================================
//
// Shared HTTP plumbing for every backend call. The marketplace identifies
// the shopper by a session cookie, so all services ride one client with a
// cookie jar, a blanket per-request timeout and no automatic retries: a
// timed-out mutation may still have been applied server-side, and replaying
// it blindly could double it. Users retry explicitly.
//
// ============================================================================

/// Failure of a remote call, bucketed by where it went wrong.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status. `message` is what the
    /// backend said and is fit to show to the user as-is.
    #[error("{message}")]
    Service { status: u16, message: String },
    /// The response arrived but its body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Build the HTTP client every remote service shares its settings with.
pub(crate) fn build_client(config: &MarketConfig) -> Result<Client, RemoteError> {
    Client::builder()
        .timeout(config.request_timeout)
        .cookie_store(true)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|error| RemoteError::Network(format!("failed to build HTTP client: {error}")))
}

/// Client for the marketplace REST API.
///
/// One instance implements the cart, order and catalog services so they all
/// share the session cookie that ties the cart to the shopper.
#[derive(Debug, Clone)]
pub struct MarketApi {
    pub(crate) client: Client,
    base_url: String,
}

impl MarketApi {
    pub fn new(config: &MarketConfig) -> Result<Self, RemoteError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pass successful responses through; turn everything else into a
    /// [`RemoteError::Service`] carrying the backend's own message.
    pub(crate) async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Service {
            status,
            message: service_message(status, &body),
        })
    }
}

/// Shape of the backend's error bodies. Plain handlers return `message`,
/// framework-generated problem documents return `title`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

fn service_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.title) {
            return message;
        }
    }
    format!("request failed with HTTP {status}")
}
