//! The release run, stage by stage
//!
//! Stages run strictly in order and the first failing command ends the run.
//! Nothing is rolled back: manifests already written stay written.
//!
//! | Stage            | Normal            | Dry-run                |
//! |------------------|-------------------|------------------------|
//! | resolve/confirm  | prompt            | prompt                 |
//! | tests            | run               | printed                |
//! | manifests        | written           | planned, printed       |
//! | build, changelog | run               | run                    |
//! | commit           | run if diff       | printed if diff        |
//! | publish          | manual notice     | skipped                |
//! | tag, push        | run               | printed                |

use crate::core::context::WorkspaceContext;
use crate::core::error::ReleaseResult;
use crate::core::exec::{CommandSpec, Executor};
use crate::core::vcs::SystemGit;
use crate::release::manifest::ManifestUpdater;
use crate::release::prompt::Prompter;
use crate::release::publish::Publisher;
use crate::release::resolve::{confirm_target, resolve_target};
use crate::release::version::effective_pre_id;
use crate::ui::Console;
use semver::Version;
use std::path::Path;

/// Per-run inputs from the command line
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
  /// Explicit target version; prompted for when absent
  pub version: Option<String>,
  /// Pre-release identifier override
  pub pre_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
  Released(Version),
  /// The user answered "no" at confirmation
  Declined,
}

pub struct ReleaseWorkflow<'a> {
  pub ctx: &'a WorkspaceContext,
  pub exec: &'a Executor<'a>,
  pub prompter: &'a dyn Prompter,
  pub publisher: &'a dyn Publisher,
  pub console: &'a Console,
}

impl ReleaseWorkflow<'_> {
  pub fn run(&self, options: &ReleaseOptions) -> ReleaseResult<ReleaseOutcome> {
    self.console.step("🍊 Resolving release version...");
    let pre_id = effective_pre_id(&self.ctx.current_version, options.pre_id.as_deref());
    let target = resolve_target(
      &self.ctx.current_version,
      options.version.as_deref(),
      pre_id.as_deref(),
      self.prompter,
    )?;

    let tag = self.ctx.tag_for(&target);
    if !confirm_target(&tag, self.prompter)? {
      self.console.info("Release cancelled, nothing was changed");
      return Ok(ReleaseOutcome::Declined);
    }

    self.run_tests()?;
    self.update_manifests(&target)?;
    self.build()?;
    self.generate_changelog()?;
    self.commit(&tag)?;
    self.publish(&target)?;
    self.tag_and_push(&tag)?;

    if self.exec.mode().is_dry_run() {
      self.console.highlight("✌ Dry run finished!");
    }

    Ok(ReleaseOutcome::Released(target))
  }

  fn run_tests(&self) -> ReleaseResult<()> {
    self.console.step("🍇 Running tests...");
    let cmd = CommandSpec::from_argv(&self.ctx.config.commands.test)?;
    self.exec.run_if_not_dry(&cmd)?;

    if self.exec.mode().is_dry_run() {
      self.console.step("🍉 Skipped");
    } else {
      self.console.step("🍇 Tests passed");
    }
    Ok(())
  }

  fn update_manifests(&self, target: &Version) -> ReleaseResult<()> {
    self.console.step("🍈 Updating package versions and internal dependencies...");
    let updater = ManifestUpdater::new(&self.ctx.root, self.ctx.dependency_rule());
    let updates = updater.plan(target)?;

    for update in &updates {
      for rewrite in &update.rewrites {
        self.console.highlight(&rewrite.to_string());
      }

      if self.exec.mode().is_dry_run() {
        let shown = relative_to(update.manifest.path(), &self.ctx.root);
        self.console.dry_run(&format!("write {} (version {})", shown, target));
      } else {
        update.manifest.save()?;
      }
    }

    if self.exec.mode().is_dry_run() {
      self.console.step("🍉 Skipped");
    } else {
      self.console.step(&format!("🍈 Updated {} manifest(s)", updates.len()));
    }
    Ok(())
  }

  fn build(&self) -> ReleaseResult<()> {
    self.console.step("🍋 Building packages...");
    self.exec.run(&CommandSpec::from_argv(&self.ctx.config.commands.build)?)
  }

  fn generate_changelog(&self) -> ReleaseResult<()> {
    self.console.step("🍍 Generating changelog...");
    self
      .exec
      .run(&CommandSpec::from_argv(&self.ctx.config.commands.changelog)?)?;
    self.console.step("🍍 Changelog generated");
    Ok(())
  }

  fn commit(&self, tag: &str) -> ReleaseResult<()> {
    let diff = self.exec.capture(&SystemGit::diff())?;
    if diff.trim().is_empty() {
      self.console.info("No changes to commit");
      return Ok(());
    }

    self.console.step("🥭 Committing changes...");
    self.exec.run_if_not_dry(&SystemGit::add_all())?;
    self
      .exec
      .run_if_not_dry(&SystemGit::commit(&format!("release: {}", tag)))
  }

  fn publish(&self, target: &Version) -> ReleaseResult<()> {
    self.console.step("🍎 Publishing packages...");
    self
      .publisher
      .publish(&self.ctx.packages, target, self.exec, self.console)
  }

  fn tag_and_push(&self, tag: &str) -> ReleaseResult<()> {
    let remote = &self.ctx.config.remote;

    self.console.step(&format!("🍑 Tagging {}...", tag));
    self.exec.run_if_not_dry(&SystemGit::tag(tag))?;
    self.console.step(&format!("🍑 Pushing tag to {}...", remote));
    self.exec.run_if_not_dry(&SystemGit::push_tag(remote, tag))?;
    self.console.step("🍑 Tag pushed");

    self.console.step("🍐 Pushing commits...");
    self.exec.run_if_not_dry(&SystemGit::push())?;
    self.console.step("🍐 Push complete!");
    Ok(())
  }
}

fn relative_to(path: &Path, root: &Path) -> String {
  path.strip_prefix(root).unwrap_or(path).display().to_string()
}
