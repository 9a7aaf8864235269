use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for mini-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every key is optional; a repository without any config file releases with
/// the defaults below.
///
/// ```toml
/// scope = "@mini-release"
/// packages_dir = "packages"
/// remote = "origin"
/// tag_prefix = "v"
/// dependency_fields = ["dependencies"]
///
/// [commands]
/// test = ["node_modules/.bin/jest", "--clearCache"]
/// build = ["yarn", "build"]
/// changelog = ["yarn", "changelog"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
  /// npm scope of internal packages; derived from the root package name when unset
  #[serde(default)]
  pub scope: Option<String>,

  /// Directory (relative to the root) whose subdirectories are the internal packages
  #[serde(default = "default_packages_dir")]
  pub packages_dir: PathBuf,

  /// Remote that receives the release tag
  #[serde(default = "default_remote")]
  pub remote: String,

  /// Prefix for release tags and the commit message
  #[serde(default = "default_tag_prefix")]
  pub tag_prefix: String,

  /// package.json fields whose internal entries are rewritten
  #[serde(default = "default_dependency_fields")]
  pub dependency_fields: Vec<String>,

  #[serde(default)]
  pub commands: CommandsConfig,
}

/// External tools invoked by the release stages, as argv arrays
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandsConfig {
  #[serde(default = "default_test_command")]
  pub test: Vec<String>,

  #[serde(default = "default_build_command")]
  pub build: Vec<String>,

  #[serde(default = "default_changelog_command")]
  pub changelog: Vec<String>,
}

fn default_packages_dir() -> PathBuf {
  PathBuf::from("packages")
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_tag_prefix() -> String {
  "v".to_string()
}

fn default_dependency_fields() -> Vec<String> {
  vec!["dependencies".to_string()]
}

fn default_test_command() -> Vec<String> {
  vec!["node_modules/.bin/jest".to_string(), "--clearCache".to_string()]
}

fn default_build_command() -> Vec<String> {
  vec!["yarn".to_string(), "build".to_string()]
}

fn default_changelog_command() -> Vec<String> {
  vec!["yarn".to_string(), "changelog".to_string()]
}

impl Default for CommandsConfig {
  fn default() -> Self {
    Self {
      test: default_test_command(),
      build: default_build_command(),
      changelog: default_changelog_command(),
    }
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      scope: None,
      packages_dir: default_packages_dir(),
      remote: default_remote(),
      tag_prefix: default_tag_prefix(),
      dependency_fields: default_dependency_fields(),
      commands: CommandsConfig::default(),
    }
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  pub fn validate(&self) -> ReleaseResult<()> {
    if let Some(ref scope) = self.scope
      && (!scope.starts_with('@') || scope.len() < 2 || scope.contains('/'))
    {
      return Err(invalid("scope", format!("'{}' must look like '@name'", scope)));
    }

    if self.tag_prefix.chars().any(char::is_whitespace) {
      return Err(invalid("tag_prefix", "must not contain whitespace"));
    }

    if self.remote.trim().is_empty() {
      return Err(invalid("remote", "must not be empty"));
    }

    if self.dependency_fields.is_empty() {
      return Err(invalid("dependency_fields", "list at least one package.json field"));
    }

    for (name, argv) in [
      ("commands.test", &self.commands.test),
      ("commands.build", &self.commands.build),
      ("commands.changelog", &self.commands.changelog),
    ] {
      if argv.first().is_none_or(|program| program.trim().is_empty()) {
        return Err(invalid(name, "must start with a program name"));
      }
    }

    Ok(())
  }

  /// Scope of internal packages
  ///
  /// An explicit `scope` wins. Otherwise a scoped root name (`@acme/root`)
  /// yields `@acme` and a bare root name (`acme`) yields `@acme`.
  pub fn resolve_scope(&self, root_package_name: &str) -> String {
    if let Some(scope) = &self.scope {
      return scope.clone();
    }

    match root_package_name.strip_prefix('@') {
      Some(rest) => format!("@{}", rest.split('/').next().unwrap_or(rest)),
      None => format!("@{}", root_package_name),
    }
  }
}

fn invalid(field: &str, reason: impl Into<String>) -> ReleaseError {
  ReleaseError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.into(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ReleaseConfig::load(dir.path()).unwrap();

    assert_eq!(config.packages_dir, PathBuf::from("packages"));
    assert_eq!(config.remote, "origin");
    assert_eq!(config.tag_prefix, "v");
    assert_eq!(config.dependency_fields, vec!["dependencies"]);
    assert_eq!(config.commands.build, vec!["yarn", "build"]);
  }

  #[test]
  fn test_partial_config_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
      dir.path().join("release.toml"),
      r#"
scope = "@acme"

[commands]
build = ["pnpm", "run", "build"]
"#,
    )
    .unwrap();

    let config = ReleaseConfig::load(dir.path()).unwrap();
    assert_eq!(config.scope.as_deref(), Some("@acme"));
    assert_eq!(config.commands.build, vec!["pnpm", "run", "build"]);
    assert_eq!(config.commands.changelog, vec!["yarn", "changelog"]);
    assert_eq!(config.remote, "origin");
  }

  #[test]
  fn test_config_search_order() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".config")).unwrap();
    fs::write(dir.path().join(".config/release.toml"), "remote = \"upstream\"\n").unwrap();

    let config = ReleaseConfig::load(dir.path()).unwrap();
    assert_eq!(config.remote, "upstream");

    fs::write(dir.path().join("release.toml"), "remote = \"fork\"\n").unwrap();
    let config = ReleaseConfig::load(dir.path()).unwrap();
    assert_eq!(config.remote, "fork");
  }

  #[test]
  fn test_empty_command_rejected() {
    let config = ReleaseConfig {
      commands: CommandsConfig {
        build: vec![],
        ..Default::default()
      },
      ..Default::default()
    };
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_bad_scope_rejected() {
    let config = ReleaseConfig {
      scope: Some("acme".to_string()),
      ..Default::default()
    };
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_invalid_field_error_names_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("release.toml"), "scope = \"acme\"\n").unwrap();

    let err = ReleaseConfig::load(dir.path()).unwrap_err();
    let text = err.to_string();
    assert!(text.contains(&dir.path().join("release.toml").display().to_string()));
    assert!(text.contains("Invalid config field 'scope'"));
  }

  #[test]
  fn test_unknown_key_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("release.toml"), "remtoe = \"origin\"\n").unwrap();
    assert!(ReleaseConfig::load(dir.path()).is_err());
  }

  #[test]
  fn test_resolve_scope() {
    let config = ReleaseConfig::default();
    assert_eq!(config.resolve_scope("mini-release"), "@mini-release");
    assert_eq!(config.resolve_scope("@acme/monorepo"), "@acme");

    let explicit = ReleaseConfig {
      scope: Some("@other".to_string()),
      ..Default::default()
    };
    assert_eq!(explicit.resolve_scope("mini-release"), "@other");
  }
}
