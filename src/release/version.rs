//! Semantic version increments
//!
//! Candidate computation follows the usual npm conventions: a plain bump
//! drops any pre-release, and when a pre-release identifier is in effect each
//! bump becomes its "pre" variant (`1.2.3-beta.0` → patch `1.2.4-beta.0`).

use crate::core::error::{ReleaseError, ReleaseResult};
use semver::{Prerelease, Version};
use std::fmt;

/// How a version should be advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementKind {
  Patch,
  Minor,
  Major,
  /// Advance the pre-release counter (`1.2.3-beta.0` → `1.2.3-beta.1`)
  Prerelease,
}

impl IncrementKind {
  /// Kinds offered in the release menu, in display order
  pub fn offered(pre_id: Option<&str>) -> Vec<IncrementKind> {
    let mut kinds = vec![IncrementKind::Patch, IncrementKind::Minor, IncrementKind::Major];
    if pre_id.is_some() {
      kinds.push(IncrementKind::Prerelease);
    }
    kinds
  }

  pub fn as_str(self) -> &'static str {
    match self {
      IncrementKind::Patch => "patch",
      IncrementKind::Minor => "minor",
      IncrementKind::Major => "major",
      IncrementKind::Prerelease => "prerelease",
    }
  }
}

impl fmt::Display for IncrementKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Parse a user-supplied version, accepting a leading `v`
pub fn parse_version(input: &str) -> ReleaseResult<Version> {
  let trimmed = input.trim();
  let candidate = trimmed.strip_prefix('v').unwrap_or(trimmed);
  Version::parse(candidate).map_err(|e| ReleaseError::invalid_version(input, e))
}

/// Validate a `--preId` value
pub fn parse_pre_id(input: &str) -> ReleaseResult<String> {
  let valid = !input.is_empty()
    && !input.contains('.')
    && Prerelease::new(input).is_ok()
    && !input.chars().all(|c| c.is_ascii_digit());
  if !valid {
    return Err(ReleaseError::invalid_version(
      input,
      "pre-release id must be a single alphanumeric identifier such as 'beta'",
    ));
  }
  Ok(input.to_string())
}

/// Pre-release identifier in effect for this run
///
/// An explicit override wins; otherwise the leading identifier of the current
/// pre-release is kept when it is alphanumeric (`beta` in `1.2.3-beta.0`).
pub fn effective_pre_id(current: &Version, explicit: Option<&str>) -> Option<String> {
  if let Some(id) = explicit {
    return Some(id.to_string());
  }

  current
    .pre
    .as_str()
    .split('.')
    .next()
    .filter(|id| !id.is_empty() && !id.chars().all(|c| c.is_ascii_digit()))
    .map(str::to_string)
}

/// Compute the next version for `kind`
pub fn increment(current: &Version, kind: IncrementKind, pre_id: Option<&str>) -> ReleaseResult<Version> {
  let mut next = Version::new(current.major, current.minor, current.patch);

  match kind {
    IncrementKind::Major => {
      next.major = bump(current, next.major)?;
      next.minor = 0;
      next.patch = 0;
    }
    IncrementKind::Minor => {
      next.minor = bump(current, next.minor)?;
      next.patch = 0;
    }
    IncrementKind::Patch => {
      next.patch = bump(current, next.patch)?;
    }
    IncrementKind::Prerelease => return increment_prerelease(current, pre_id),
  }

  if let Some(id) = pre_id {
    next.pre = prerelease(&format!("{}.0", id))?;
  }
  Ok(next)
}

fn increment_prerelease(current: &Version, pre_id: Option<&str>) -> ReleaseResult<Version> {
  let mut next = Version::new(current.major, current.minor, current.patch);

  if current.pre.is_empty() {
    next.patch = bump(current, next.patch)?;
    next.pre = prerelease(&format!("{}.0", pre_id.unwrap_or("0")))?;
    return Ok(next);
  }

  let same_id = match pre_id {
    Some(id) => current.pre.as_str() == id || current.pre.as_str().starts_with(&format!("{}.", id)),
    None => true,
  };

  if !same_id {
    next.pre = prerelease(&format!("{}.0", pre_id.unwrap_or("0")))?;
    return Ok(next);
  }

  let mut parts: Vec<String> = current.pre.as_str().split('.').map(str::to_string).collect();
  match parts.last().and_then(|p| p.parse::<u64>().ok()) {
    Some(n) => {
      let last = parts.len() - 1;
      parts[last] = bump(current, n)?.to_string();
    }
    None => parts.push("0".to_string()),
  }
  next.pre = prerelease(&parts.join("."))?;
  Ok(next)
}

fn bump(current: &Version, n: u64) -> ReleaseResult<u64> {
  n.checked_add(1)
    .ok_or_else(|| ReleaseError::invalid_version(current.to_string(), "cannot be incremented without overflow"))
}

fn prerelease(text: &str) -> ReleaseResult<Prerelease> {
  Prerelease::new(text).map_err(|e| ReleaseError::invalid_version(text, e))
}
