//! Core building blocks shared by the release stages
//!
//! - **config**: optional release.toml parsing and validation
//! - **context**: workspace data loaded once at startup
//! - **error**: error types with contextual help messages
//! - **exec**: command specs, runners and the dry-run aware executor
//! - **vcs**: git operations (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod vcs;
