//! Job run domain type

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Job type the fetcher lists runs for
pub const SPARK_JOB_TYPE: &str = "spark";

/// A job run as returned by the CDE listing call
///
/// The payload is kept opaque; only the identifier and job type are read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRun(Map<String, Value>);

impl JobRun {
    /// Resolve the run identifier
    ///
    /// `id` is preferred, `jobRunId` is the fallback. Strings are used as-is,
    /// numbers are rendered in decimal. Missing, null, empty or zero values
    /// do not resolve.
    pub fn id(&self) -> Option<String> {
        self.0
            .get("id")
            .and_then(identifier)
            .or_else(|| self.0.get("jobRunId").and_then(identifier))
    }

    /// Job type recorded on the run, if any
    pub fn job_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Whether the run belongs to the given job type
    ///
    /// Runs that carry no type are assumed to match.
    pub fn is_job_type(&self, job_type: &str) -> bool {
        self.job_type().is_none_or(|t| t.eq_ignore_ascii_case(job_type))
    }
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(value: Value) -> JobRun {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_id_prefers_id_field() {
        assert_eq!(run(json!({"id": "7", "jobRunId": "9"})).id().as_deref(), Some("7"));
    }

    #[test]
    fn test_id_falls_back_to_job_run_id() {
        assert_eq!(run(json!({"jobRunId": "9"})).id().as_deref(), Some("9"));
    }

    #[test]
    fn test_numeric_ids_render_in_decimal() {
        assert_eq!(run(json!({"id": 1042})).id().as_deref(), Some("1042"));
    }

    #[test]
    fn test_falsy_id_uses_fallback() {
        assert_eq!(run(json!({"id": 0, "jobRunId": 12})).id().as_deref(), Some("12"));
        assert_eq!(run(json!({"id": "", "jobRunId": "12"})).id().as_deref(), Some("12"));
        assert_eq!(run(json!({"id": null, "jobRunId": "12"})).id().as_deref(), Some("12"));
    }

    #[test]
    fn test_missing_id_does_not_resolve() {
        assert_eq!(run(json!({"job": "etl", "status": "succeeded"})).id(), None);
        assert_eq!(run(json!({"id": {"nested": 1}})).id(), None);
    }

    #[test]
    fn test_job_type_filter() {
        assert!(run(json!({"id": 1, "type": "spark"})).is_job_type(SPARK_JOB_TYPE));
        assert!(run(json!({"id": 1})).is_job_type(SPARK_JOB_TYPE));
        assert!(!run(json!({"id": 1, "type": "airflow"})).is_job_type(SPARK_JOB_TYPE));
    }
}
