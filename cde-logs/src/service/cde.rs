//! CDE-backed cluster connector

use std::time::Duration;

use async_trait::async_trait;
use cde_client::{CdeClient, CdeSession, ClientError, Credentials, RetryPolicy};
use cde_core::domain::cluster::ClusterTarget;
use cde_core::domain::job_run::JobRun;
use cde_core::domain::log_type::LogTypeInfo;
use reqwest::Client;
use tracing::debug;

use super::{ClusterConnector, ClusterSession};
use crate::error::FetchError;

/// Connects to CDE virtual clusters with workload credentials
#[derive(Debug, Clone)]
pub struct CdeConnector {
    credentials: Credentials,
    retry: RetryPolicy,
    timeout: Duration,
    token_url: Option<String>,
}

impl CdeConnector {
    /// Creates a connector with no retries and a 60 second request timeout
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            retry: RetryPolicy::none(),
            timeout: Duration::from_secs(60),
            token_url: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Authenticate every cluster against this token endpoint
    ///
    /// Without it the gateway URL is derived from each cluster's host.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = Some(token_url.into());
        self
    }
}

#[async_trait]
impl ClusterConnector for CdeConnector {
    async fn connect(&self, target: &ClusterTarget) -> Result<Box<dyn ClusterSession>, FetchError> {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ClientError::from)?;

        let mut client = CdeClient::with_client(target.url(), http).with_retry_policy(self.retry);
        if let Some(token_url) = &self.token_url {
            client = client.with_token_url(token_url.clone());
        }

        let session = client.authenticate(&self.credentials).await?;
        debug!("Authenticated against {}", target.label());

        Ok(Box::new(session))
    }
}

#[async_trait]
impl ClusterSession for CdeSession {
    async fn list_job_runs(&self, job_type: &str) -> Result<Vec<JobRun>, FetchError> {
        Ok(CdeSession::list_job_runs(self, job_type).await?)
    }

    async fn list_log_types(&self, job_run_id: &str) -> Result<Vec<LogTypeInfo>, FetchError> {
        Ok(CdeSession::list_log_types(self, job_run_id).await?)
    }

    async fn download_logs(&self, job_run_id: &str, log_type: &str) -> Result<String, FetchError> {
        Ok(CdeSession::download_logs(self, job_run_id, log_type).await?)
    }
}
