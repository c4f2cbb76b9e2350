//! Core domain types
//!
//! The values the log fetcher walks through: a cluster target per endpoint,
//! the job runs listed on it, the log types each run exposes, and the
//! on-disk location every downloaded artifact lands in.

pub mod artifact;
pub mod cluster;
pub mod job_run;
pub mod log_type;
