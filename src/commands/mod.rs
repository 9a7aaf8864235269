//! CLI commands for mini-release
//!
//! - **release**: resolve a version, bump manifests, build, changelog,
//!   commit, tag and push

pub mod release;

pub use release::run_release;
