//! package.json rewriting
//!
//! A release sets the same version on the root manifest and every internal
//! package, and pins internal dependency entries to that version. Manifests
//! are edited as JSON values with key order preserved, then written back
//! pretty-printed (2 spaces) with a trailing newline.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::release::packages::PackageSet;
use semver::Version;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed package.json bound to its file
#[derive(Debug, Clone)]
pub struct Manifest {
  path: PathBuf,
  doc: Map<String, Value>,
}

impl Manifest {
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Self::parse(path, &content)
  }

  pub fn parse(path: &Path, content: &str) -> ReleaseResult<Self> {
    let value: Value =
      serde_json::from_str(content).map_err(|e| ReleaseError::manifest(path, format!("invalid JSON: {}", e)))?;

    match value {
      Value::Object(doc) => Ok(Self {
        path: path.to_path_buf(),
        doc,
      }),
      _ => Err(ReleaseError::manifest(path, "top level must be a JSON object")),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn name(&self) -> Option<&str> {
    self.doc.get("name").and_then(Value::as_str)
  }

  pub fn version(&self) -> Option<&str> {
    self.doc.get("version").and_then(Value::as_str)
  }

  /// Name for log lines; falls back to the file path for nameless manifests
  pub fn display_name(&self) -> String {
    self
      .name()
      .map(str::to_string)
      .unwrap_or_else(|| self.path.display().to_string())
  }

  /// Set the version and pin internal dependencies
  pub fn apply_release(&mut self, version: &Version, rule: &DependencyRule<'_>) -> Vec<DependencyRewrite> {
    let version = version.to_string();
    self.doc.insert("version".to_string(), Value::String(version.clone()));

    let owner = self.display_name();
    let mut rewrites = Vec::new();

    for field in rule.fields {
      let Some(Value::Object(deps)) = self.doc.get_mut(field.as_str()) else {
        continue;
      };

      for (dep, spec) in deps.iter_mut() {
        if !rule.is_internal(dep) {
          continue;
        }
        rewrites.push(DependencyRewrite {
          manifest: owner.clone(),
          field: field.clone(),
          dependency: dep.clone(),
          version: version.clone(),
        });
        *spec = Value::String(version.clone());
      }
    }

    rewrites
  }

  /// Serialized file content
  pub fn render(&self) -> ReleaseResult<String> {
    let mut out = serde_json::to_string_pretty(&self.doc)?;
    out.push('\n');
    Ok(out)
  }

  pub fn save(&self) -> ReleaseResult<()> {
    let content = self.render()?;
    fs::write(&self.path, content).with_context(|| format!("Failed to write {}", self.path.display()))?;
    Ok(())
  }
}

/// Which dependency entries point at internal packages
///
/// An entry is internal when its key is `<scope>/<name>` and `<name>` is in
/// the package set. Everything else is left untouched.
pub struct DependencyRule<'a> {
  pub scope: &'a str,
  pub packages: &'a PackageSet,
  pub fields: &'a [String],
}

impl DependencyRule<'_> {
  pub fn is_internal(&self, dependency: &str) -> bool {
    dependency
      .strip_prefix(self.scope)
      .and_then(|rest| rest.strip_prefix('/'))
      .is_some_and(|name| self.packages.contains(name))
  }
}

/// One dependency entry pinned to the release version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRewrite {
  pub manifest: String,
  pub field: String,
  pub dependency: String,
  pub version: String,
}

impl std::fmt::Display for DependencyRewrite {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} -> {} -> {}@{}", self.manifest, self.field, self.dependency, self.version)
  }
}

/// A manifest with the release applied in memory
#[derive(Debug)]
pub struct ManifestUpdate {
  pub manifest: Manifest,
  pub rewrites: Vec<DependencyRewrite>,
}

/// Applies a release version across the root and all internal manifests
pub struct ManifestUpdater<'a> {
  root: &'a Path,
  rule: DependencyRule<'a>,
}

impl<'a> ManifestUpdater<'a> {
  pub fn new(root: &'a Path, rule: DependencyRule<'a>) -> Self {
    Self { root, rule }
  }

  /// Root manifest first, then packages in sorted order
  pub fn manifest_paths(&self) -> Vec<PathBuf> {
    let mut paths = vec![self.root.join("package.json")];
    paths.extend(self.rule.packages.names().map(|name| self.rule.packages.manifest_path(name)));
    paths
  }

  /// Load every manifest and apply the release without touching disk
  pub fn plan(&self, version: &Version) -> ReleaseResult<Vec<ManifestUpdate>> {
    self
      .manifest_paths()
      .iter()
      .map(|path| -> ReleaseResult<ManifestUpdate> {
        let mut manifest = Manifest::load(path)?;
        let rewrites = manifest.apply_release(version, &self.rule);
        Ok(ManifestUpdate { manifest, rewrites })
      })
      .collect()
  }
}
