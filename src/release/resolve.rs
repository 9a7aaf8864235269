//! Target version resolution
//!
//! Produces the validated release version, either from the command line or
//! from the interactive menu. Nothing on disk is touched here, so an invalid
//! answer aborts the run with every manifest still intact.

use crate::core::error::ReleaseResult;
use crate::release::prompt::Prompter;
use crate::release::version::{IncrementKind, increment, parse_version};
use semver::Version;

const CUSTOM: &str = "custom";

/// Computed menu entries for `current`
pub fn candidates(current: &Version, pre_id: Option<&str>) -> ReleaseResult<Vec<(IncrementKind, Version)>> {
  IncrementKind::offered(pre_id)
    .into_iter()
    .map(|kind| increment(current, kind, pre_id).map(|version| (kind, version)))
    .collect()
}

/// Resolve the release target
///
/// With `explicit` set the string is only validated. Otherwise the user picks
/// an increment or types a custom version (pre-filled with `current`).
pub fn resolve_target(
  current: &Version,
  explicit: Option<&str>,
  pre_id: Option<&str>,
  prompter: &dyn Prompter,
) -> ReleaseResult<Version> {
  if let Some(raw) = explicit {
    return parse_version(raw);
  }

  let options = candidates(current, pre_id)?;
  let mut items: Vec<String> = options
    .iter()
    .map(|(kind, version)| format!("{} ({})", kind, version))
    .collect();
  items.push(CUSTOM.to_string());

  let choice = prompter.select("Select release type", &items)?;
  match options.get(choice) {
    Some((_, version)) => Ok(version.clone()),
    None => {
      let raw = prompter.input("Enter the version to release", &current.to_string())?;
      parse_version(&raw)
    }
  }
}

/// Ask for the go-ahead; `false` means the user declined
pub fn confirm_target(tag: &str, prompter: &dyn Prompter) -> ReleaseResult<bool> {
  prompter.confirm(&format!("Release {}?", tag))
}
