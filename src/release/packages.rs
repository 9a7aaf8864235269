//! Internal package discovery
//!
//! The package set is read once from the packages directory and then passed
//! around explicitly; nothing else lists the directory again.

use crate::core::error::{ReleaseResult, ResultExt};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// The project's own packages, keyed by directory name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSet {
  dir: PathBuf,
  names: BTreeSet<String>,
}

impl PackageSet {
  /// List `<dir>/*` directories that hold a `package.json`
  ///
  /// A missing directory yields an empty set (single-package repositories).
  pub fn discover(dir: &Path) -> ReleaseResult<Self> {
    let mut names = BTreeSet::new();

    if dir.is_dir() {
      let entries = fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
      for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.join("package.json").is_file() {
          continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
          names.insert(name.to_string());
        }
      }
    }

    Ok(Self {
      dir: dir.to_path_buf(),
      names,
    })
  }

  #[cfg(test)]
  pub fn from_names<I, S>(dir: &Path, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      dir: dir.to_path_buf(),
      names: names.into_iter().map(Into::into).collect(),
    }
  }

  pub fn contains(&self, name: &str) -> bool {
    self.names.contains(name)
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  /// Package names in sorted order
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str)
  }

  pub fn manifest_path(&self, name: &str) -> PathBuf {
    self.dir.join(name).join("package.json")
  }
}
