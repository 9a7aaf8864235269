//! Integration tests for mini-release

mod helpers;
mod test_release;
