//! CDE Log Fetcher
//!
//! Walks every job run on a list of CDE virtual clusters and saves their
//! logs under `logs/<cluster>/<job-run>/<log-type>/<cluster>.log`.
//!
//! Architecture:
//! - Configuration: credentials, endpoints and fetch options from the CLI
//! - Services: the cluster connector/session seam and its CDE implementation
//! - Parser: turns a downloaded log body into the text that is written
//! - Fetcher: the sequential cluster → job run → log type traversal
//!
//! Failures are contained at the level they happen on: a broken cluster
//! does not stop the next one, a broken job run does not stop its siblings,
//! and a failed download only loses that one artifact.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod parser;
pub mod report;
pub mod service;
pub mod writer;

pub use config::Config;
pub use error::FetchError;
pub use fetcher::{FetchOptions, LogFetcher};
pub use parser::{LogParser, SparkLogParser};
pub use report::{ClusterReport, ClusterStatus, FetchReport};
