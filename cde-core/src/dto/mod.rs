//! Data Transfer Objects for the CDE HTTP APIs
//!
//! Wire shapes returned by the token gateway and the jobs API. Domain code
//! works with the types in [`crate::domain`]; these only exist to decode
//! responses.

pub mod auth;
pub mod job_run;
