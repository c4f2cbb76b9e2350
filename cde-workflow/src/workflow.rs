//! A complete workflow declaration

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{GraphError, WorkflowGraph};
use crate::schedule::{DagSettings, DefaultArgs};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Schedule window ends ({end}) before it starts ({start})")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Failed to render workflow: {0}")]
    Render(#[from] serde_json::Error),
}

/// Settings, default task arguments and task graph of one workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(flatten)]
    pub settings: DagSettings,
    pub default_args: DefaultArgs,
    #[serde(flatten)]
    pub graph: WorkflowGraph,
}

impl Workflow {
    pub fn dag_id(&self) -> &str {
        &self.settings.dag_id
    }

    /// Check the schedule window and the graph
    ///
    /// # Returns
    /// Task ids in execution order
    pub fn validate(&self) -> Result<Vec<&str>, WorkflowError> {
        let args = &self.default_args;
        if args.end_date < args.start_date {
            return Err(WorkflowError::InvalidWindow {
                start: args.start_date,
                end: args.end_date,
            });
        }

        Ok(self.graph.validate()?)
    }

    /// Pretty JSON for the engine
    pub fn to_json(&self) -> Result<String, WorkflowError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
