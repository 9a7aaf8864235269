//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A JavaScript monorepo with git history and a bare `origin` remote
pub struct TestWorkspace {
  _root: TempDir,
  _remote: TempDir,
  pub path: PathBuf,
  pub remote_path: PathBuf,
}

impl TestWorkspace {
  /// Root package `mini-release@0.1.0`, a tracked CHANGELOG.md and a pushed
  /// `main` branch
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let remote = TempDir::new()?;
    let path = root.path().to_path_buf();
    let remote_path = remote.path().to_path_buf();

    git(&remote_path, &["init", "--bare", "--initial-branch=main"])?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["config", "tag.gpgsign", "false"])?;

    std::fs::write(
      path.join("package.json"),
      "{\n  \"name\": \"mini-release\",\n  \"version\": \"0.1.0\",\n  \"private\": true\n}\n",
    )?;
    std::fs::write(path.join("CHANGELOG.md"), "# Changelog\n")?;
    std::fs::write(path.join(".gitignore"), "build.log\n")?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial workspace setup"])?;
    git(&path, &["remote", "add", "origin", &remote_path.to_string_lossy()])?;
    git(&path, &["push", "-u", "origin", "main"])?;

    Ok(Self {
      _root: root,
      _remote: remote,
      path,
      remote_path,
    })
  }

  /// Add `packages/<name>/package.json` for `@mini-release/<name>`
  pub fn add_package(&self, name: &str, version: &str, deps: &[(&str, &str)]) -> Result<PathBuf> {
    let pkg_path = self.path.join("packages").join(name);
    std::fs::create_dir_all(&pkg_path)?;

    let mut manifest = serde_json::json!({
      "name": format!("@mini-release/{}", name),
      "version": version,
    });
    if !deps.is_empty() {
      let deps: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|(dep, spec)| (dep.to_string(), serde_json::Value::String(spec.to_string())))
        .collect();
      manifest["dependencies"] = serde_json::Value::Object(deps);
    }

    std::fs::write(
      pkg_path.join("package.json"),
      format!("{}\n", serde_json::to_string_pretty(&manifest)?),
    )?;
    Ok(pkg_path)
  }

  /// Write release.toml with shell commands standing in for jest and yarn
  pub fn write_config(&self, build: &str) -> Result<()> {
    let config = format!(
      r#"[commands]
test = ["true"]
build = ["sh", "-c", "{}"]
changelog = ["sh", "-c", "echo '## next' >> CHANGELOG.md"]
"#,
      build
    );
    std::fs::write(self.path.join("release.toml"), config)?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Commit subjects, newest first
  pub fn git_log(&self, n: usize) -> Result<Vec<String>> {
    let output = git(&self.path, &["log", &format!("-{}", n), "--format=%s"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Tags in a repository (the workspace or the bare remote)
  pub fn tags(&self, repo: &Path) -> Result<Vec<String>> {
    let output = git(repo, &["tag", "-l"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the mini-release binary; the caller checks the exit status
pub fn run_mini_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_mini-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run mini-release")
}
