//! Job run API endpoints

use cde_core::domain::job_run::JobRun;
use cde_core::domain::log_type::LogTypeInfo;
use cde_core::dto::job_run::JobRunList;
use tracing::debug;

use crate::CdeClient;
use crate::error::Result;
use crate::retry::with_retry;

/// An authenticated connection to one virtual cluster
///
/// Holds the client and the bearer token obtained from the gateway. The
/// session is read-only once created and is meant to be dropped when the
/// caller is done with the cluster.
#[derive(Debug, Clone)]
pub struct CdeSession {
    client: CdeClient,
    token: String,
}

impl CdeSession {
    pub(crate) fn new(client: CdeClient, token: String) -> Self {
        Self { client, token }
    }

    /// Open a session with an already issued token
    pub fn with_token(client: CdeClient, token: impl Into<String>) -> Self {
        Self::new(client, token.into())
    }

    /// The bearer token used for requests
    pub fn token(&self) -> &str {
        &self.token
    }

    // =============================================================================
    // Job Runs
    // =============================================================================

    /// List job runs of the given job type
    ///
    /// Runs that report a different job type are left out; runs without a
    /// type are kept.
    pub async fn list_job_runs(&self, job_type: &str) -> Result<Vec<JobRun>> {
        let url = format!("{}/job-runs", self.client.api_url);
        let url = url.as_str();

        let list: JobRunList = with_retry(&self.client.retry, "list job runs", move || async move {
            let response = self
                .client
                .client
                .get(url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            self.client.handle_response(response).await
        })
        .await?;

        let runs: Vec<JobRun> = list
            .into_runs()
            .into_iter()
            .filter(|run| run.is_job_type(job_type))
            .collect();

        debug!("Listed {} {} job run(s)", runs.len(), job_type);
        Ok(runs)
    }

    // =============================================================================
    // Job Run Logs
    // =============================================================================

    /// List the log types available for a job run
    pub async fn list_log_types(&self, job_run_id: &str) -> Result<Vec<LogTypeInfo>> {
        let url = format!("{}/job-runs/{}/log-types", self.client.api_url, job_run_id);
        let url = url.as_str();

        with_retry(&self.client.retry, "list log types", move || async move {
            let response = self
                .client
                .client
                .get(url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            self.client.handle_response(response).await
        })
        .await
    }

    /// Download the raw logs of one type for a job run
    pub async fn download_logs(&self, job_run_id: &str, log_type: &str) -> Result<String> {
        let url = format!("{}/job-runs/{}/logs", self.client.api_url, job_run_id);
        let url = url.as_str();

        with_retry(&self.client.retry, "download logs", move || async move {
            let response = self
                .client
                .client
                .get(url)
                .query(&[("type", log_type)])
                .bearer_auth(&self.token)
                .send()
                .await?;

            self.client.handle_text_response(response).await
        })
        .await
    }
}
