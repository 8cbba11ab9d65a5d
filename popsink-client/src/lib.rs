//! Popsink HTTP Client
//!
//! A small, type-safe client for the Popsink API, used by the Terraform
//! provider to manage environments, teams and pipelines.
//!
//! Every request is authenticated with a bearer token and exchanges JSON.
//! Lookups of absent resources return `Ok(None)` instead of an error, and
//! deletes of absent resources succeed.
//!
//! # Example
//!
//! ```no_run
//! use popsink_client::PopsinkClient;
//! use popsink_core::dto::team::CreateTeam;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PopsinkClient::new("https://api.popsink.com", "my-token")?;
//!
//!     let team = client.create_team(&CreateTeam {
//!         name: "data".to_string(),
//!         description: "Data platform team".to_string(),
//!         env_id: None,
//!     }).await?;
//!
//!     println!("Created team: {}", team.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod envs;
mod pipelines;
mod teams;

pub use error::{ClientError, Result};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Deadline applied to every request made by a client built with [`PopsinkClient::new`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Popsink API
///
/// Endpoints are grouped by resource:
/// - Environments (create, get, update; the API has no delete)
/// - Teams (create, get, update, delete)
/// - Pipelines (create, get, update, delete)
#[derive(Clone)]
pub struct PopsinkClient {
    /// Base URL of the API, without trailing slash
    base_url: String,
    /// Bearer token sent with every request
    token: String,
    /// HTTP client instance
    client: Client,
}

impl fmt::Debug for PopsinkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopsinkClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl PopsinkClient {
    /// Create a new client with the default 30 second timeout
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://api.popsink.com")
    /// * `token` - API token sent as `Authorization: Bearer <token>`
    ///
    /// # Errors
    /// Returns an error if the URL is not http(s) or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Self::with_client(base_url, token, client)
    }

    /// Create a new client around a preconfigured reqwest client
    ///
    /// This allows tests and embedders to control TLS, proxies and timeouts.
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Result<Self> {
        let base_url = base_url.into();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidRequest(format!(
                "base URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        })
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Start an authenticated JSON request against `path`
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = method.as_str(), url = url.as_str(), "Sending Popsink API request");

        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
    }

    /// Send a request without a body
    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        Ok(self.request(method, path).send().await?)
    }

    /// Send a request with a JSON-encoded body
    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let payload = serde_json::to_vec(body).map_err(|e| {
            ClientError::ParseError(format!("failed to marshal request body: {}", e))
        })?;

        Ok(self.request(method, path).body(payload).send().await?)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-2xx statuses become [`ClientError::ApiError`] carrying the body text.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = check_response(response).await?;
        let body = response.text().await.map_err(|e| {
            ClientError::ParseError(format!("failed to read response body: {}", e))
        })?;

        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("failed to unmarshal response: {}", e)))
    }

    /// Handle a lookup response, mapping any of `absent` statuses to `None`
    async fn handle_optional_response<T: DeserializeOwned>(
        &self,
        response: Response,
        absent: &[StatusCode],
    ) -> Result<Option<T>> {
        if absent.contains(&response.status()) {
            debug!(status = response.status().as_u16(), "Resource not found");
            return Ok(None);
        }

        self.handle_response(response).await.map(Some)
    }

    /// Handle a delete response; a 404 means the resource is already gone
    async fn handle_delete_response(&self, response: Response) -> Result<()> {
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Resource already deleted");
            return Ok(());
        }

        check_response(response).await.map(|_| ())
    }
}

/// Pass 2xx responses through, turn everything else into an API error
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::api_error(status.as_u16(), body))
}
