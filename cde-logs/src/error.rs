//! Error types for the log fetcher

use std::path::PathBuf;

use cde_client::ClientError;
use cde_core::CoreError;
use thiserror::Error;

/// Errors raised while fetching and persisting logs
///
/// Each traversal level turns these into a logged, counted failure; none of
/// them ends the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be turned into a cluster target
    #[error("Invalid cluster target: {0}")]
    InvalidTarget(#[from] CoreError),

    /// Talking to the cluster failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The downloaded body could not be turned into log text
    #[error("Failed to parse logs: {0}")]
    Parse(String),

    /// Creating the output directory or writing the file failed
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
