//! External command execution with dry-run substitution
//!
//! Commands are plain data ([`CommandSpec`]) so the same value can either be
//! executed by a [`CommandRunner`] or printed as a dry-run notice. The
//! [`Executor`] owns that decision for the whole run.

use crate::core::error::{ReleaseError, ReleaseResult};
use crate::ui::Console;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Process-wide run mode, fixed once from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
  Normal,
  DryRun,
}

impl RunMode {
  pub fn from_dry_flag(dry: bool) -> Self {
    if dry { RunMode::DryRun } else { RunMode::Normal }
  }

  pub fn is_dry_run(self) -> bool {
    self == RunMode::DryRun
  }
}

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
}

impl CommandSpec {
  pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    }
  }

  /// Build from a configured argv array (`["yarn", "build"]`)
  pub fn from_argv(argv: &[String]) -> ReleaseResult<Self> {
    let (program, args) = argv
      .split_first()
      .ok_or_else(|| ReleaseError::message("Empty command in configuration"))?;
    Ok(Self::new(program.clone(), args.iter().cloned()))
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Something that can execute commands
pub trait CommandRunner {
  /// Run with inherited stdio; a non-zero exit is an error
  fn run(&self, cmd: &CommandSpec) -> ReleaseResult<()>;

  /// Run and return stdout; a non-zero exit is an error
  fn capture(&self, cmd: &CommandSpec) -> ReleaseResult<String>;
}

/// Runs commands as child processes rooted at the workspace
pub struct SystemRunner {
  root: PathBuf,
}

impl SystemRunner {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
    }
  }

  /// Relative program paths with a separator (`node_modules/.bin/jest`) are
  /// resolved against the root; bare names go through PATH.
  fn resolve_program(&self, program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
      self.root.join(path)
    } else {
      path.to_path_buf()
    }
  }

  fn command(&self, spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(self.resolve_program(&spec.program));
    cmd.current_dir(&self.root).args(&spec.args);
    cmd
  }
}

impl CommandRunner for SystemRunner {
  fn run(&self, spec: &CommandSpec) -> ReleaseResult<()> {
    let status = self.command(spec).status().map_err(|e| spawn_failed(spec, e))?;

    if !status.success() {
      return Err(exit_failed(spec, status.code()));
    }
    Ok(())
  }

  fn capture(&self, spec: &CommandSpec) -> ReleaseResult<String> {
    let output = self
      .command(spec)
      .stdin(Stdio::null())
      .stderr(Stdio::inherit())
      .output()
      .map_err(|e| spawn_failed(spec, e))?;

    if !output.status.success() {
      return Err(exit_failed(spec, output.status.code()));
    }
    Ok(String::from_utf8(output.stdout)?)
  }
}

fn spawn_failed(spec: &CommandSpec, err: std::io::Error) -> ReleaseError {
  ReleaseError::CommandFailed {
    command: spec.to_string(),
    reason: format!("could not start: {}", err),
  }
}

fn exit_failed(spec: &CommandSpec, code: Option<i32>) -> ReleaseError {
  let reason = match code {
    Some(code) => format!("exit code {}", code),
    None => "terminated by signal".to_string(),
  };
  ReleaseError::CommandFailed {
    command: spec.to_string(),
    reason,
  }
}

/// Mode-dependent executor shared by every release stage
pub struct Executor<'a> {
  mode: RunMode,
  runner: &'a dyn CommandRunner,
  console: &'a Console,
}

impl<'a> Executor<'a> {
  pub fn new(mode: RunMode, runner: &'a dyn CommandRunner, console: &'a Console) -> Self {
    Self { mode, runner, console }
  }

  pub fn mode(&self) -> RunMode {
    self.mode
  }

  /// Always executes, regardless of mode
  pub fn run(&self, cmd: &CommandSpec) -> ReleaseResult<()> {
    self.runner.run(cmd)
  }

  /// Always executes; only for read-only commands
  pub fn capture(&self, cmd: &CommandSpec) -> ReleaseResult<String> {
    self.runner.capture(cmd)
  }

  /// Executes in normal mode, prints `[dryrun] <cmd>` in dry-run mode
  pub fn run_if_not_dry(&self, cmd: &CommandSpec) -> ReleaseResult<()> {
    if self.mode.is_dry_run() {
      self.console.dry_run(&cmd.to_string());
      return Ok(());
    }
    self.runner.run(cmd)
  }
}
