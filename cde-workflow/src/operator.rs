//! Task operators
//!
//! Each variant names an operator the engine ships with, together with the
//! arguments it is instantiated with.

use serde::{Deserialize, Serialize};

/// What a task does when the engine runs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "snake_case")]
pub enum Operator {
    /// No-op task marking the start or end of a chain
    Marker,

    /// Create an object-storage bucket
    S3CreateBucket {
        bucket_name: String,
        aws_conn_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region_name: Option<String>,
    },

    /// List the keys of a bucket
    S3List { bucket: String, aws_conn_id: String },

    /// Run a shell command on the worker
    Bash {
        command: String,
        /// Publish the command's output for downstream tasks
        push_output: bool,
    },

    /// Upload `data` to `bucket` under `key`
    S3CreateObject {
        bucket: String,
        key: String,
        data: String,
        replace: bool,
        aws_conn_id: String,
    },

    /// Trigger a run of an existing CDE job
    CdeJobRun { job_name: String },

    /// Delete a bucket, with its contents when `force_delete` is set
    S3DeleteBucket {
        bucket_name: String,
        force_delete: bool,
        aws_conn_id: String,
    },
}

impl Operator {
    /// Short operator name, as used in the serialized form
    pub fn kind(&self) -> &'static str {
        match self {
            Operator::Marker => "marker",
            Operator::S3CreateBucket { .. } => "s3_create_bucket",
            Operator::S3List { .. } => "s3_list",
            Operator::Bash { .. } => "bash",
            Operator::S3CreateObject { .. } => "s3_create_object",
            Operator::CdeJobRun { .. } => "cde_job_run",
            Operator::S3DeleteBucket { .. } => "s3_delete_bucket",
        }
    }
}

/// Template that pulls the published output of `task_id` at run time
pub fn output_of(task_id: &str) -> String {
    format!("{{{{ ti.xcom_pull(task_ids=['{}'])}}}}", task_id)
}
