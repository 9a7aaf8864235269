//! Release command implementation
//!
//! Builds the workspace context, checks git, then hands off to the release
//! workflow with the terminal prompter and the process runner.

use crate::core::context::WorkspaceContext;
use crate::core::error::ReleaseResult;
use crate::core::exec::{Executor, RunMode, SystemRunner};
use crate::core::vcs::SystemGit;
use crate::release::prompt::TerminalPrompter;
use crate::release::publish::ManualPublisher;
use crate::release::version::parse_pre_id;
use crate::release::{ReleaseOptions, ReleaseOutcome, ReleaseWorkflow};
use crate::ui::Console;
use std::env;

/// Run a release from the current directory
pub fn run_release(version: Option<String>, dry: bool, pre_id: Option<String>, yes: bool) -> ReleaseResult<()> {
  let workspace_root = env::current_dir()?;

  // Reject a bad --preId before anything else happens
  let pre_id = pre_id.as_deref().map(parse_pre_id).transpose()?;

  let ctx = WorkspaceContext::build(&workspace_root)?;
  let git = SystemGit::open(&ctx.root)?;

  let console = Console::stdout();
  let mode = RunMode::from_dry_flag(dry);

  println!(
    "📦 {} at {} ({} internal package(s), git root {})",
    ctx.scope,
    ctx.current_version,
    ctx.packages.len(),
    git.work_tree().display()
  );
  if ctx.packages.is_empty() {
    println!(
      "⚠️  No internal packages under {}, only the root manifest will be bumped",
      ctx.config.packages_dir.display()
    );
  }
  if mode.is_dry_run() {
    println!("🔍 Dry-run mode (mutating commands are printed, not run)");
  }
  println!();

  let runner = SystemRunner::new(&ctx.root);
  let exec = Executor::new(mode, &runner, &console);
  let prompter = TerminalPrompter::new(yes);

  let workflow = ReleaseWorkflow {
    ctx: &ctx,
    exec: &exec,
    prompter: &prompter,
    publisher: &ManualPublisher,
    console: &console,
  };

  let options = ReleaseOptions { version, pre_id };
  match workflow.run(&options)? {
    ReleaseOutcome::Released(version) if !mode.is_dry_run() => {
      println!();
      println!("✅ Released {}", ctx.tag_for(&version));
    }
    ReleaseOutcome::Released(_) | ReleaseOutcome::Declined => {}
  }

  Ok(())
}
