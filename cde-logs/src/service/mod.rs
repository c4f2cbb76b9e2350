//! Service layer
//!
//! The traversal talks to clusters only through these traits, so the
//! fetcher can be driven by the real CDE client or by an in-memory fake.

mod cde;

pub use cde::CdeConnector;

use async_trait::async_trait;
use cde_core::domain::cluster::ClusterTarget;
use cde_core::domain::job_run::JobRun;
use cde_core::domain::log_type::LogTypeInfo;

use crate::error::FetchError;

/// Opens a session against a cluster
#[async_trait]
pub trait ClusterConnector: Send + Sync {
    /// Authenticates against the cluster behind `target`
    ///
    /// # Returns
    /// A session the traversal uses for every call on this cluster
    async fn connect(&self, target: &ClusterTarget) -> Result<Box<dyn ClusterSession>, FetchError>;
}

/// Calls available on an authenticated cluster
#[async_trait]
pub trait ClusterSession: Send + Sync {
    /// Lists job runs of the given job type
    async fn list_job_runs(&self, job_type: &str) -> Result<Vec<JobRun>, FetchError>;

    /// Lists the log types available for a job run
    async fn list_log_types(&self, job_run_id: &str) -> Result<Vec<LogTypeInfo>, FetchError>;

    /// Downloads the raw logs of one type for a job run
    async fn download_logs(&self, job_run_id: &str, log_type: &str) -> Result<String, FetchError>;
}
