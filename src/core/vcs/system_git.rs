//! System git backend
//!
//! Release git operations are expressed as [`CommandSpec`]s so the executor can
//! run them or print them under dry-run. Only the repository preflight spawns
//! git directly.

use crate::core::error::{GitError, ReleaseError, ReleaseResult};
use crate::core::exec::CommandSpec;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to check the repository exists.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .map_err(|e| {
        ReleaseError::Git(GitError::Unavailable {
          reason: e.to_string(),
        })
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::with_help(
        format!("Failed to open git repository: {}", stderr.trim()),
        "Run mini-release from inside the monorepo's git checkout.",
      ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(Self {
      work_tree: PathBuf::from(stdout.trim()),
    })
  }

  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// `git diff` - unstaged changes to tracked files
  pub fn diff() -> CommandSpec {
    CommandSpec::new("git", ["diff"])
  }

  /// `git add -A`
  pub fn add_all() -> CommandSpec {
    CommandSpec::new("git", ["add", "-A"])
  }

  pub fn commit(message: &str) -> CommandSpec {
    CommandSpec::new("git", ["commit", "-m", message])
  }

  /// Lightweight tag at HEAD
  pub fn tag(name: &str) -> CommandSpec {
    CommandSpec::new("git", ["tag", name])
  }

  pub fn push_tag(remote: &str, tag: &str) -> CommandSpec {
    CommandSpec::new("git", ["push".to_string(), remote.to_string(), format!("refs/tags/{}", tag)])
  }

  /// Push the current branch to its upstream
  pub fn push() -> CommandSpec {
    CommandSpec::new("git", ["push"])
  }
}
