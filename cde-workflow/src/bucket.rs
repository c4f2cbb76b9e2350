//! Bucket provisioning workflow
//!
//! Creates a bucket, lists it, reads a mounted file, uploads the file's
//! content as an object, runs a Spark job and deletes the bucket again.

use chrono::{NaiveDate, NaiveDateTime};

use crate::graph::{Task, WorkflowGraph};
use crate::operator::{Operator, output_of};
use crate::schedule::{DagSettings, DefaultArgs};
use crate::workflow::{Workflow, WorkflowError};

pub const USERNAME: &str = "pdefusco-051224-v1";
pub const OWNER: &str = "pauldefusco";
pub const AWS_CONN_ID: &str = "s3_default";
pub const REGION: &str = "us-east-2";
pub const CDE_JOB_NAME: &str = "simple-pyspark";
pub const CONF_FILE: &str = "/app/mount/my_file_resource/my_file.txt";
pub const OBJECT_KEY: &str = "my_file.txt";
pub const SCHEDULE: &str = "@hourly";
pub const RETRY_DELAY_SECS: u64 = 5;

/// Task ids in the order they run
pub const TASK_ORDER: [&str; 8] = [
    "start",
    "create_bucket",
    "list_keys",
    "read_conf",
    "create_object",
    "etl",
    "delete_bucket",
    "end",
];

pub fn bucket_name() -> String {
    format!("eastbucket-{}", USERNAME)
}

pub fn dag_id() -> String {
    format!("{}-aws-prvdrs", USERNAME)
}

fn datetime(year: i32, month: u32, day: u32, hour: u32) -> Result<NaiveDateTime, WorkflowError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .ok_or_else(|| {
            WorkflowError::InvalidDate(format!("{}-{}-{} {}:00", year, month, day, hour))
        })
}

/// Build and validate the bucket workflow
pub fn bucket_workflow() -> Result<Workflow, WorkflowError> {
    let bucket = bucket_name();

    let mut graph = WorkflowGraph::new();
    graph
        .add_task(Task::new("start", Operator::Marker))
        .add_task(Task::new(
            "create_bucket",
            Operator::S3CreateBucket {
                bucket_name: bucket.clone(),
                aws_conn_id: AWS_CONN_ID.to_string(),
                region_name: Some(REGION.to_string()),
            },
        ))
        .add_task(Task::new(
            "list_keys",
            Operator::S3List {
                bucket: bucket.clone(),
                aws_conn_id: AWS_CONN_ID.to_string(),
            },
        ))
        .add_task(Task::new(
            "read_conf",
            Operator::Bash {
                command: format!("cat {}", CONF_FILE),
                push_output: true,
            },
        ))
        .add_task(Task::new(
            "create_object",
            Operator::S3CreateObject {
                bucket: bucket.clone(),
                key: OBJECT_KEY.to_string(),
                data: output_of("read_conf"),
                replace: true,
                aws_conn_id: AWS_CONN_ID.to_string(),
            },
        ))
        .add_task(Task::new(
            "etl",
            Operator::CdeJobRun {
                job_name: CDE_JOB_NAME.to_string(),
            },
        ))
        .add_task(Task::new(
            "delete_bucket",
            Operator::S3DeleteBucket {
                bucket_name: bucket,
                force_delete: true,
                aws_conn_id: AWS_CONN_ID.to_string(),
            },
        ))
        .add_task(Task::new("end", Operator::Marker))
        .chain(&TASK_ORDER);

    let workflow = Workflow {
        settings: DagSettings::new(dag_id()),
        default_args: DefaultArgs {
            owner: OWNER.to_string(),
            retry_delay_secs: RETRY_DELAY_SECS,
            depends_on_past: false,
            start_date: datetime(2023, 9, 20, 0)?,
            end_date: datetime(2024, 9, 30, 8)?,
            schedule_interval: SCHEDULE.to_string(),
        },
        graph,
    };

    workflow.validate()?;
    workflow.graph.linear_order()?;

    Ok(workflow)
}
