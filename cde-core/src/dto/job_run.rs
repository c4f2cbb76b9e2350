//! Job run listing DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job_run::JobRun;

/// Body of the job run listing call
///
/// The API answers either with a bare array or with an envelope holding a
/// `runs` array. Any other body is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobRunList {
    Runs(Vec<JobRun>),
    Envelope { runs: Vec<JobRun> },
}

impl JobRunList {
    pub fn into_runs(self) -> Vec<JobRun> {
        match self {
            JobRunList::Runs(runs) => runs,
            JobRunList::Envelope { runs } => runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let list: JobRunList = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(list.into_runs().len(), 2);
    }

    #[test]
    fn test_envelope() {
        let list: JobRunList =
            serde_json::from_str(r#"{"runs": [{"id": 3}], "meta": {"count": 1}}"#).unwrap();
        let runs = list.into_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].id().as_deref(), Some("3"));
    }

    #[test]
    fn test_object_without_runs_is_rejected() {
        let result =
            serde_json::from_str::<JobRunList>(r#"{"message": "access denied for workload user"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_envelope_is_empty_listing() {
        let list: JobRunList = serde_json::from_str(r#"{"runs": []}"#).unwrap();
        assert!(list.into_runs().is_empty());
    }
}
