//! CDE HTTP Client
//!
//! A small, typed HTTP client for the pieces of the CDE jobs API that the
//! operational tools need: obtaining a bearer token from the cluster gateway,
//! listing job runs, listing a run's log types and downloading raw logs.
//!
//! # Example
//!
//! ```no_run
//! use cde_client::{CdeClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CdeClient::new("https://abc.cde-xyz.example.site/dex/api/v1");
//!     let session = client
//!         .authenticate(&Credentials::new("workload-user", "secret"))
//!         .await?;
//!
//!     for run in session.list_job_runs("spark").await? {
//!         println!("{:?}", run.id());
//!     }
//!     Ok(())
//! }
//! ```

mod auth;
pub mod error;
mod job_runs;
pub mod retry;

// Re-export commonly used types
pub use auth::{Credentials, derive_token_url};
pub use error::{ClientError, Result};
pub use job_runs::CdeSession;
pub use retry::RetryPolicy;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for one CDE virtual cluster
///
/// The client is unauthenticated; [`CdeClient::authenticate`] exchanges
/// credentials for a [`CdeSession`] that carries the bearer token.
#[derive(Debug, Clone)]
pub struct CdeClient {
    /// Jobs API base URL (e.g., "https://abc.cde-xyz.example.site/dex/api/v1")
    api_url: String,
    /// Token endpoint; derived from `api_url` when not set explicitly
    token_url: Option<String>,
    /// Retry behaviour for every request made through this client
    retry: RetryPolicy,
    /// HTTP client instance
    client: Client,
}

impl CdeClient {
    /// Create a new client for a jobs API endpoint
    ///
    /// # Example
    /// ```
    /// use cde_client::CdeClient;
    ///
    /// let client = CdeClient::new("https://abc.cde-xyz.example.site/dex/api/v1/");
    /// assert_eq!(client.api_url(), "https://abc.cde-xyz.example.site/dex/api/v1");
    /// ```
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(api_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(api_url: impl Into<String>, client: Client) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token_url: None,
            retry: RetryPolicy::none(),
            client,
        }
    }

    /// Use an explicit token endpoint instead of the derived gateway URL
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = Some(token_url.into());
        self
    }

    /// Retry transient failures according to `policy`
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Get the jobs API base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get the retry policy
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Fail on a non-success status, otherwise hand the response back
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Failing to receive the body is a transport error; failing to decode
    /// it is a parse error.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let body = self.check_status(response).await?.bytes().await?;

        serde_json::from_slice(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is plain text
    async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        Ok(self.check_status(response).await?.text().await?)
    }
}
