//! Release orchestration for a multi-package JavaScript workspace
//!
//! # Flow
//!
//! 1. Resolve the target version (argument or menu) and confirm it
//! 2. Run the test suite
//! 3. Write the version into the root and every internal package.json,
//!    pinning internal dependencies to it
//! 4. Build, then generate the changelog
//! 5. Commit the working tree as `release: v<version>`
//! 6. Publish (manual for now)
//! 7. Tag `v<version>`, push the tag, push commits
//!
//! Under `--dry` steps 2, 3, 5 and 7 only print what they would do.

pub mod manifest;
pub mod packages;
pub mod prompt;
pub mod publish;
pub mod resolve;
pub mod version;
pub mod workflow;

pub use workflow::{ReleaseOptions, ReleaseOutcome, ReleaseWorkflow};
