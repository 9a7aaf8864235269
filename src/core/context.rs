//! Workspace context - build once, pass everywhere
//!
//! Holds everything a release run reads up front: configuration, the root
//! manifest's version, the resolved scope and the internal package set.
//! Nothing is mutated after construction.

use crate::core::config::ReleaseConfig;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use crate::release::manifest::{DependencyRule, Manifest};
use crate::release::packages::PackageSet;
use semver::Version;
use std::path::{Path, PathBuf};

pub struct WorkspaceContext {
  /// Monorepo root (directory holding the root package.json)
  pub root: PathBuf,

  pub config: ReleaseConfig,

  /// Version currently recorded in the root package.json
  pub current_version: Version,

  /// npm scope shared by internal packages, e.g. `@mini-release`
  pub scope: String,

  pub packages: PackageSet,
}

impl WorkspaceContext {
  pub fn build(workspace_root: &Path) -> ReleaseResult<Self> {
    let root = workspace_root.to_path_buf();
    let config = ReleaseConfig::load(&root)?;

    let root_manifest_path = root.join("package.json");
    if !root_manifest_path.is_file() {
      return Err(ReleaseError::Config(ConfigError::RootManifestNotFound {
        workspace_root: root.clone(),
      }));
    }
    let root_manifest = Manifest::load(&root_manifest_path)?;

    let raw_version = root_manifest
      .version()
      .ok_or_else(|| ReleaseError::manifest(&root_manifest_path, "missing \"version\" field"))?;
    let current_version =
      Version::parse(raw_version).map_err(|e| ReleaseError::invalid_version(raw_version, e))?;

    let root_name = match root_manifest.name() {
      Some(name) => name.to_string(),
      None => root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("workspace")
        .to_string(),
    };
    let scope = config.resolve_scope(&root_name);

    let packages = PackageSet::discover(&root.join(&config.packages_dir))?;

    Ok(Self {
      root,
      config,
      current_version,
      scope,
      packages,
    })
  }

  /// Rule deciding which dependency entries get pinned
  pub fn dependency_rule(&self) -> DependencyRule<'_> {
    DependencyRule {
      scope: &self.scope,
      packages: &self.packages,
      fields: &self.config.dependency_fields,
    }
  }

  /// Git tag for a release, e.g. `v1.2.3`
  pub fn tag_for(&self, version: &Version) -> String {
    format!("{}{}", self.config.tag_prefix, version)
  }
}
