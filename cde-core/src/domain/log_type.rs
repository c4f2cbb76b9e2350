//! Log type domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A log type descriptor returned for a job run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogTypeInfo {
    #[serde(rename = "type", default)]
    pub log_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogTypeInfo {
    /// Descriptor for a known log type
    pub fn named(log_type: impl Into<String>) -> Self {
        Self {
            log_type: Some(log_type.into()),
            extra: Map::new(),
        }
    }

    /// The log type name, if the descriptor carries a non-empty one
    pub fn name(&self) -> Option<&str> {
        self.log_type.as_deref().filter(|t| !t.is_empty())
    }
}

/// Make a log type usable as a single path segment
///
/// Path separators become hyphens, so `driver/stdout` maps to `driver-stdout`.
pub fn sanitize_log_type(log_type: &str) -> String {
    path_segment(log_type)
}

/// Turn an API-supplied value into one directory name
///
/// Separators become hyphens. Values that would resolve to the current or
/// parent directory (`.`, `..`, empty) have every character replaced by `_`.
pub fn path_segment(value: &str) -> String {
    let segment = value.replace(['/', '\\'], "-");

    if segment.chars().all(|c| c == '.') {
        "_".repeat(segment.len().max(1))
    } else {
        segment
    }
}
