//! Simrun HTTP Client
//!
//! A small, type-safe HTTP client for the simulation evaluation service.
//!
//! The client exposes the two calls a CI step needs: queueing a simulation run
//! and retrieving its results. Both are also available through the
//! [`SimulationApi`] trait so callers can swap in another implementation.
//!
//! # Example
//!
//! ```no_run
//! use simrun_client::SimulationClient;
//! use simrun_core::dto::run::QueueRunRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SimulationClient::new("http://localhost:8080", "secret");
//!
//!     let handle = client.queue_run(&QueueRunRequest {
//!         agent_id: "agent-1".to_string(),
//!         ..Default::default()
//!     }).await?;
//!
//!     println!("Queued run: {}", handle.run_id);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod runs;

pub use api::SimulationApi;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Header carrying the API credential
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the simulation evaluation service
#[derive(Debug, Clone)]
pub struct SimulationClient {
    /// Base URL of the service (e.g., "https://eval.example.com")
    base_url: String,
    /// Credential sent with every request
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl SimulationClient {
    /// Create a new client with a default HTTP client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service API
    /// * `api_key` - The credential sent in the [`API_KEY_HEADER`] header
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use simrun_client::SimulationClient;
    /// use std::time::Duration;
    ///
    /// let http_client = simrun_client::http_client(Duration::from_secs(30)).unwrap();
    /// let client = SimulationClient::with_client("http://localhost:8080", "secret", http_client);
    /// assert_eq!(client.base_url(), "http://localhost:8080");
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and decode the JSON body
    ///
    /// The body is read as text first so both failure kinds can carry it:
    /// a non-success status becomes [`ClientError::ApiError`], a success status
    /// with an unexpected body becomes [`ClientError::ParseError`].
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::api_error(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            ClientError::ParseError(format!("{} (body: {})", e, body))
        })
    }
}

/// Build the HTTP client used against the service
///
/// Sets a per-request timeout and identifies the caller in `User-Agent`.
pub fn http_client(request_timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(request_timeout)
        .user_agent(concat!("simrun/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SimulationClient::new("http://localhost:8080", "key");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = SimulationClient::new("http://localhost:8080/", "key");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = http_client(Duration::from_secs(5)).unwrap();
        let client = SimulationClient::with_client("http://localhost:8080", "key", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
