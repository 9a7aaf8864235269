//! Integration tests for the `mini-release` binary
//!
//! Shell commands stand in for jest/yarn, so these only run on unix.
#![cfg(unix)]

use crate::helpers::{TestWorkspace, git, run_mini_release};
use anyhow::Result;

const PKG_B_BEFORE: &str = "\"@mini-release/pkg-a\": \"^0.1.0\"";

fn workspace(build: &str) -> Result<TestWorkspace> {
  let ws = TestWorkspace::new()?;
  ws.add_package("pkg-a", "0.1.0", &[])?;
  ws.add_package("pkg-b", "0.1.0", &[("@mini-release/pkg-a", "^0.1.0"), ("lodash", "^4.0.0")])?;
  ws.write_config(build)?;
  ws.commit("Add packages")?;
  Ok(ws)
}

#[test]
fn test_dry_run_touches_no_manifest_or_ref() -> Result<()> {
  let ws = workspace("echo built > build.log")?;
  let root_before = ws.read_file("package.json")?;
  let pkg_b_before = ws.read_file("packages/pkg-b/package.json")?;

  let output = run_mini_release(&ws.path, &["--dry", "--yes", "0.2.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(output.status.success(), "dry run failed:\n{}", stdout);

  // Mutating steps were only printed
  for expected in [
    "[dryrun] true",
    "[dryrun] write packages/pkg-b/package.json (version 0.2.0)",
    "[dryrun] git add -A",
    "[dryrun] git commit -m release: v0.2.0",
    "[dryrun] git tag v0.2.0",
    "[dryrun] git push origin refs/tags/v0.2.0",
    "[dryrun] git push",
  ] {
    assert!(stdout.contains(expected), "missing '{}' in:\n{}", expected, stdout);
  }
  assert!(stdout.contains("Dry run finished"));

  // Build and changelog still ran
  assert!(ws.file_exists("build.log"));
  assert!(ws.read_file("CHANGELOG.md")?.contains("## next"));

  assert_eq!(ws.read_file("package.json")?, root_before);
  assert_eq!(ws.read_file("packages/pkg-b/package.json")?, pkg_b_before);
  assert_eq!(ws.git_log(1)?, vec!["Add packages"]);
  assert!(ws.tags(&ws.path)?.is_empty());
  assert!(ws.tags(&ws.remote_path)?.is_empty());

  Ok(())
}

#[test]
fn test_release_commits_tags_and_pushes() -> Result<()> {
  let ws = workspace("echo built > build.log")?;

  let output = run_mini_release(&ws.path, &["--yes", "0.2.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(output.status.success(), "release failed:\n{}\n{}", stdout, stderr);

  assert!(ws.read_file("package.json")?.contains("\"version\": \"0.2.0\""));
  assert!(ws.read_file("packages/pkg-a/package.json")?.contains("\"version\": \"0.2.0\""));

  let pkg_b = ws.read_file("packages/pkg-b/package.json")?;
  assert!(pkg_b.contains("\"@mini-release/pkg-a\": \"0.2.0\""));
  assert!(pkg_b.contains("\"lodash\": \"^4.0.0\""));
  assert!(pkg_b.ends_with("}\n"));
  assert!(stdout.contains("@mini-release/pkg-b -> dependencies -> @mini-release/pkg-a@0.2.0"));

  assert_eq!(ws.git_log(1)?, vec!["release: v0.2.0"]);
  assert_eq!(ws.tags(&ws.path)?, vec!["v0.2.0"]);
  assert_eq!(ws.tags(&ws.remote_path)?, vec!["v0.2.0"]);

  let remote_head = git(&ws.remote_path, &["log", "-1", "--format=%s", "main"])?;
  assert_eq!(String::from_utf8_lossy(&remote_head.stdout).trim(), "release: v0.2.0");

  Ok(())
}

#[test]
fn test_invalid_version_aborts_before_any_change() -> Result<()> {
  let ws = workspace("echo built > build.log")?;

  let output = run_mini_release(&ws.path, &["--yes", "not-a-version"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(!output.status.success());
  assert!(stderr.contains("Invalid version 'not-a-version'"), "stderr:\n{}", stderr);
  assert!(ws.read_file("packages/pkg-b/package.json")?.contains(PKG_B_BEFORE));
  assert!(!ws.file_exists("build.log"));
  assert_eq!(ws.git_log(1)?, vec!["Add packages"]);

  Ok(())
}

#[test]
fn test_invalid_pre_id_is_rejected() -> Result<()> {
  let ws = workspace("echo built > build.log")?;

  let output = run_mini_release(&ws.path, &["--dry", "--preId=be.ta"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(!output.status.success());
  assert!(stderr.contains("Invalid version 'be.ta'"), "stderr:\n{}", stderr);

  Ok(())
}

#[test]
fn test_failing_build_stops_before_git() -> Result<()> {
  let ws = workspace("exit 3")?;

  let output = run_mini_release(&ws.path, &["--yes", "0.2.0"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(!output.status.success());
  assert!(stderr.contains("exit code 3"), "stderr:\n{}", stderr);

  // Manifests written before the build are not rolled back
  assert!(ws.read_file("package.json")?.contains("\"version\": \"0.2.0\""));
  assert_eq!(ws.git_log(1)?, vec!["Add packages"]);
  assert!(ws.tags(&ws.path)?.is_empty());

  Ok(())
}

#[test]
fn test_missing_root_manifest() -> Result<()> {
  let ws = workspace("true")?;
  std::fs::remove_file(ws.path.join("package.json"))?;

  let output = run_mini_release(&ws.path, &["--dry", "--yes", "1.0.0"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(!output.status.success());
  assert!(stderr.contains("No root manifest found"), "stderr:\n{}", stderr);

  Ok(())
}
