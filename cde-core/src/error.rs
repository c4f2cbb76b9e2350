//! Error types for core domain construction

use thiserror::Error;

/// Errors raised while building domain values from user input
#[derive(Debug, Error)]
pub enum CoreError {
    /// The endpoint could not be parsed as a URL
    #[error("Invalid cluster URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The endpoint parsed but carries no hostname to label it with
    #[error("Cluster URL '{0}' has no hostname")]
    MissingHost(String),
}
