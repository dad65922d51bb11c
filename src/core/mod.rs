//! Core plumbing shared by every docs-versioner command
//!
//! - **config**: versioning.toml parsing with built-in defaults
//! - **context**: Site root and resolved document paths
//! - **error**: Error types with contextual help messages and exit codes
//! - **store**: Atomic document writes

pub mod config;
pub mod context;
pub mod error;
pub mod store;
