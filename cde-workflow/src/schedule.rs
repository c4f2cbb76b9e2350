//! Scheduling settings handed to the engine with a workflow

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Arguments applied to every task of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultArgs {
    pub owner: String,
    /// Wait between task retries, in seconds
    pub retry_delay_secs: u64,
    pub depends_on_past: bool,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// Cron expression or preset such as `@hourly`
    pub schedule_interval: String,
}

/// Workflow-level engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagSettings {
    pub dag_id: String,
    /// Backfill runs missed between `start_date` and now
    pub catchup: bool,
    pub is_paused_upon_creation: bool,
}

impl DagSettings {
    /// Settings for an active workflow that does not backfill
    pub fn new(dag_id: impl Into<String>) -> Self {
        Self {
            dag_id: dag_id.into(),
            catchup: false,
            is_paused_upon_creation: false,
        }
    }
}
