//! Registry publishing
//!
//! Publishing is a manual step for now: there is no registry protocol or
//! credential handling here. The [`Publisher`] trait is the seam a real
//! implementation plugs into.

use crate::core::error::ReleaseResult;
use crate::core::exec::Executor;
use crate::release::packages::PackageSet;
use crate::ui::Console;
use semver::Version;

pub trait Publisher {
  fn publish(
    &self,
    packages: &PackageSet,
    version: &Version,
    exec: &Executor<'_>,
    console: &Console,
  ) -> ReleaseResult<()>;
}

/// Leaves publishing to a human
pub struct ManualPublisher;

impl Publisher for ManualPublisher {
  fn publish(
    &self,
    packages: &PackageSet,
    version: &Version,
    exec: &Executor<'_>,
    console: &Console,
  ) -> ReleaseResult<()> {
    if exec.mode().is_dry_run() {
      console.step("🍉 Skipped");
      return Ok(());
    }

    console.step(&format!(
      "🍎 Publishing {} package(s) at {} to the npm registry is not automated; publish them manually",
      packages.len(),
      version
    ));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::exec::RunMode;
  use crate::core::exec::testing::RecordingRunner;
  use std::path::Path;

  #[test]
  fn test_manual_publisher_never_runs_commands() {
    let packages = PackageSet::from_names(Path::new("packages"), ["pkg-a", "pkg-b"]);
    let version = Version::parse("1.0.0").unwrap();

    for mode in [RunMode::Normal, RunMode::DryRun] {
      let runner = RecordingRunner::new();
      let console = Console::capturing();
      let exec = Executor::new(mode, &runner, &console);

      ManualPublisher.publish(&packages, &version, &exec, &console).unwrap();

      assert!(runner.calls().is_empty());
      let lines = console.lines();
      assert_eq!(lines.len(), 1);
      if mode.is_dry_run() {
        assert!(lines[0].contains("Skipped"));
      } else {
        assert!(lines[0].contains("not automated"));
      }
    }
  }
}
