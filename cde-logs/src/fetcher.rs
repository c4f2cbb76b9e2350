//! Log fetch traversal
//!
//! Visits clusters, their job runs and each run's log types strictly one
//! after another. Every level handles its own failures: it logs them,
//! counts them in the report and moves on to the next sibling.

use std::path::PathBuf;

use cde_core::domain::artifact::{ArtifactKey, DEFAULT_OUTPUT_ROOT};
use cde_core::domain::cluster::ClusterTarget;
use cde_core::domain::job_run::SPARK_JOB_TYPE;
use tracing::{debug, error, info, warn};

use crate::error::FetchError;
use crate::parser::LogParser;
use crate::report::{ClusterReport, ClusterStatus, FetchReport};
use crate::service::{ClusterConnector, ClusterSession};
use crate::writer::write_artifact;

/// What to fetch and where to put it
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Directory the per-cluster trees are created under
    pub output_root: PathBuf,
    /// Fetch only this log type instead of every available one
    pub log_type: Option<String>,
    /// Job type whose runs are listed
    pub job_type: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            log_type: None,
            job_type: SPARK_JOB_TYPE.to_string(),
        }
    }
}

/// Fetches job run logs from a list of clusters
pub struct LogFetcher<C, P> {
    connector: C,
    parser: P,
    options: FetchOptions,
}

impl<C: ClusterConnector, P: LogParser> LogFetcher<C, P> {
    pub fn new(connector: C, parser: P, options: FetchOptions) -> Self {
        Self {
            connector,
            parser,
            options,
        }
    }

    /// Process every endpoint in order
    ///
    /// Never fails: problems are logged and recorded in the report.
    pub async fn run(&self, api_urls: &[String]) -> FetchReport {
        let mut report = FetchReport::default();

        for api_url in api_urls {
            report.clusters.push(self.fetch_cluster(api_url).await);
        }

        report
    }

    /// Process one endpoint, containing any cluster-level failure
    pub async fn fetch_cluster(&self, api_url: &str) -> ClusterReport {
        let mut report = ClusterReport::new(api_url);

        if let Err(e) = self.walk_cluster(api_url, &mut report).await {
            error!("Error processing cluster {}: {}", api_url, e);
            report.status = ClusterStatus::Failed(e.to_string());
        }

        report
    }

    async fn walk_cluster(&self, api_url: &str, report: &mut ClusterReport) -> Result<(), FetchError> {
        let target = ClusterTarget::parse(api_url)?;
        report.label = Some(target.label().to_string());

        info!("=== Connecting to cluster: {} ===", target);

        let session = self.connector.connect(&target).await?;
        let job_runs = session.list_job_runs(&self.options.job_type).await?;

        if job_runs.is_empty() {
            warn!("No job runs found on {}", target.label());
            report.status = ClusterStatus::NoJobRuns;
            return Ok(());
        }

        info!("Found {} job run(s) on {}", job_runs.len(), target.label());

        for job_run in &job_runs {
            report.job_runs += 1;

            let Some(job_id) = job_run.id() else {
                warn!("Skipping job run with missing ID on {}", target.label());
                report.job_runs_skipped += 1;
                continue;
            };

            info!("→ Processing job run ID: {}", job_id);

            if let Err(e) = self
                .fetch_job_run(session.as_ref(), &target, &job_id, report)
                .await
            {
                error!(
                    "Failed to process job run {} on {}: {}",
                    job_id,
                    target.label(),
                    e
                );
                report.job_runs_failed += 1;
            }
        }

        Ok(())
    }

    async fn fetch_job_run(
        &self,
        session: &dyn ClusterSession,
        target: &ClusterTarget,
        job_id: &str,
        report: &mut ClusterReport,
    ) -> Result<(), FetchError> {
        if let Some(log_type) = &self.options.log_type {
            info!("  → Fetching specific log type: {}", log_type);
            self.fetch_and_record(session, target, job_id, log_type, report)
                .await;
            return Ok(());
        }

        let log_types = session.list_log_types(job_id).await?;

        if log_types.is_empty() {
            warn!("No log types found for job run {}", job_id);
            report.job_runs_skipped += 1;
            return Ok(());
        }

        for log_info in &log_types {
            let Some(log_type) = log_info.name() else {
                debug!("Ignoring log type descriptor without a type for job run {}", job_id);
                continue;
            };

            info!("  → Fetching log type: {}", log_type);
            self.fetch_and_record(session, target, job_id, log_type, report)
                .await;
        }

        Ok(())
    }

    /// Fetch one artifact, containing any log-type-level failure
    async fn fetch_and_record(
        &self,
        session: &dyn ClusterSession,
        target: &ClusterTarget,
        job_id: &str,
        log_type: &str,
        report: &mut ClusterReport,
    ) {
        match self.fetch_artifact(session, target, job_id, log_type).await {
            Ok(path) => {
                info!("    Saved log: {}", path.display());
                report.saved.push(path);
            }
            Err(e) => {
                error!(
                    "    Failed to fetch {} for job run {}: {}",
                    log_type, job_id, e
                );
                report.artifacts_failed += 1;
            }
        }
    }

    async fn fetch_artifact(
        &self,
        session: &dyn ClusterSession,
        target: &ClusterTarget,
        job_id: &str,
        log_type: &str,
    ) -> Result<PathBuf, FetchError> {
        let raw = session.download_logs(job_id, log_type).await?;
        let text = self.parser.parse(&raw)?;

        let key = ArtifactKey::new(target.label(), job_id, log_type);
        write_artifact(&self.options.output_root, &key, &text).await
    }
}
