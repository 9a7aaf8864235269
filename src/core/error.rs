//! Error types for mini-release with contextual messages
//!
//! Every failure ends the run. The printer shows the message and, when one is
//! known, a hint pointing at the likely fix.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for mini-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors (release.toml)
  Config(ConfigError),

  /// Git preflight errors
  Git(GitError),

  /// A version string that is not valid semver
  InvalidVersion { input: String, reason: String },

  /// An external command could not be spawned or exited non-zero
  CommandFailed { command: String, reason: String },

  /// A package.json that cannot be read or has the wrong shape
  Manifest { path: PathBuf, reason: String },

  /// Interactive prompt failure (no terminal, I/O on the tty)
  Prompt(String),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  pub fn invalid_version(input: impl Into<String>, reason: impl fmt::Display) -> Self {
    ReleaseError::InvalidVersion {
      input: input.into(),
      reason: reason.to_string(),
    }
  }

  pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
    ReleaseError::Manifest {
      path: path.into(),
      reason: reason.into(),
    }
  }

  /// Add context to an existing error
  ///
  /// Typed errors are folded into a message headed by the context, keeping
  /// their text and help.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => ReleaseError::Message {
        context: Some(other.to_string()),
        help: other.help_message(),
        message: ctx_str,
      },
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::InvalidVersion { .. } => Some(
        "Versions must follow semver, e.g. 1.2.3 or 1.2.3-beta.0. \
         No files were changed."
          .to_string(),
      ),
      ReleaseError::Prompt(_) => {
        Some("Pass the version explicitly and --yes when running without a terminal.".to_string())
      }
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::InvalidVersion { input, reason } => write!(f, "Invalid version '{}': {}", input, reason),
      ReleaseError::CommandFailed { command, reason } => write!(f, "Command `{}` failed: {}", command, reason),
      ReleaseError::Manifest { path, reason } => write!(f, "Bad manifest {}: {}", path.display(), reason),
      ReleaseError::Prompt(msg) => write!(f, "Prompt failed: {}", msg),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ReleaseError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ReleaseError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<dialoguer::Error> for ReleaseError {
  fn from(err: dialoguer::Error) -> Self {
    ReleaseError::Prompt(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Root package.json missing
  RootManifestNotFound { workspace_root: PathBuf },

  /// A field holds a value the tool cannot use
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::RootManifestNotFound { .. } => {
        Some("Run mini-release from the monorepo root (the directory holding the root package.json).".to_string())
      }
      ConfigError::InvalidField { .. } => {
        Some("Fix the value in release.toml or remove it to use the default.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::RootManifestNotFound { workspace_root } => {
        write!(
          f,
          "No root manifest found.\nExpected file: {}/package.json",
          workspace_root.display()
        )
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid config field '{}': {}", field, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Git itself is missing or unusable
  Unavailable { reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Initialize the repository first or check the path: {}",
        path.display()
      )),
      GitError::Unavailable { .. } => Some("Install git and make sure it is on PATH.".to_string()),
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::Unavailable { reason } => {
        write!(f, "Git is not available: {}", reason)
      }
    }
  }
}

/// Result type alias for mini-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
