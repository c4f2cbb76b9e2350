//! CDE Core
//!
//! Core types shared by the CDE operational tools.
//!
//! This crate contains:
//! - Domain types: cluster targets, job runs, log types and artifact paths
//! - DTOs: wire shapes returned by the CDE jobs API and token gateway

pub mod domain;
pub mod dto;
pub mod error;

pub use error::CoreError;
