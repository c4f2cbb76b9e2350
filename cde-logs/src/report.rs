//! Outcome of a fetch run

use std::path::PathBuf;

/// How processing of one cluster ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterStatus {
    /// Every job run was visited
    Completed,
    /// The cluster listed no job runs
    NoJobRuns,
    /// Connecting or listing failed; the message says why
    Failed(String),
}

/// What happened on one cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterReport {
    pub url: String,
    pub label: Option<String>,
    pub status: ClusterStatus,
    /// Job runs returned by the listing call
    pub job_runs: usize,
    /// Job runs without an identifier or without log types
    pub job_runs_skipped: usize,
    /// Job runs whose log types could not be listed
    pub job_runs_failed: usize,
    pub saved: Vec<PathBuf>,
    pub artifacts_failed: usize,
}

impl ClusterReport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: None,
            status: ClusterStatus::Completed,
            job_runs: 0,
            job_runs_skipped: 0,
            job_runs_failed: 0,
            saved: Vec::new(),
            artifacts_failed: 0,
        }
    }

    /// Label when known, the raw URL otherwise
    pub fn name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.url)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, ClusterStatus::Failed(_))
    }
}

/// Per-cluster results of a whole run, in endpoint order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub clusters: Vec<ClusterReport>,
}

impl FetchReport {
    pub fn artifacts_saved(&self) -> usize {
        self.clusters.iter().map(|c| c.saved.len()).sum()
    }

    pub fn artifacts_failed(&self) -> usize {
        self.clusters.iter().map(|c| c.artifacts_failed).sum()
    }

    pub fn clusters_failed(&self) -> usize {
        self.clusters.iter().filter(|c| c.is_failed()).count()
    }
}
