//! Error types for gemsmith with contextual messages and exit codes
//!
//! Every error maps to a sysexits-style exit code so shell scripts driving a
//! release can tell a usage mistake from a broken working tree or a bug.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for gemsmith (see sysexits.h)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Command line usage error
  Usage = 64,
  /// Input data was incorrect (config, README, project attributes)
  DataErr = 65,
  /// A required service is unavailable (git, gem)
  Unavailable = 69,
  /// Internal software error
  Software = 70,
  /// A file could not be created or written
  CantCreat = 73,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for gemsmith
#[derive(Debug)]
pub enum SmithError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// A run-scoped invariant was broken, such as two versions for one key
  Invariant { message: String },

  /// I/O errors, with what gemsmith was doing at the time
  Io { source: io::Error, context: Option<String> },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl SmithError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    SmithError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    SmithError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Create an invariant violation
  pub fn invariant(msg: impl Into<String>) -> Self {
    SmithError::Invariant { message: msg.into() }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      SmithError::Message { message, context, help } => SmithError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      SmithError::Io { source, context } => SmithError::Io {
        source,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      SmithError::Config(ConfigError::InvalidValue { .. }) => ExitCode::Usage,
      SmithError::Config(_) => ExitCode::DataErr,
      SmithError::Git(_) => ExitCode::Unavailable,
      SmithError::Invariant { .. } => ExitCode::Software,
      SmithError::Io { .. } => ExitCode::CantCreat,
      SmithError::Message { .. } => ExitCode::DataErr,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      SmithError::Config(e) => e.help_message(),
      SmithError::Git(e) => e.help_message(),
      SmithError::Invariant { .. } => {
        Some("Two lookups disagreed on a version. Check for duplicate installed gems, then rerun with `gemsmith -vv dependencies`.".to_string())
      }
      SmithError::Message { help, .. } => help.clone(),
      SmithError::Io { .. } => None,
    }
  }
}

impl fmt::Display for SmithError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SmithError::Config(e) => write!(f, "{}", e),
      SmithError::Git(e) => write!(f, "{}", e),
      SmithError::Invariant { message } => write!(f, "Internal invariant violated: {}", message),
      SmithError::Io { source, context: None } => write!(f, "I/O error: {}", source),
      SmithError::Io {
        source,
        context: Some(ctx),
      } => write!(f, "{}\nI/O error: {}", ctx, source),
      SmithError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for SmithError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SmithError::Io { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for SmithError {
  fn from(err: io::Error) -> Self {
    SmithError::Io {
      source: err,
      context: None,
    }
  }
}

impl From<String> for SmithError {
  fn from(msg: String) -> Self {
    SmithError::message(msg)
  }
}

impl From<&str> for SmithError {
  fn from(msg: &str) -> Self {
    SmithError::message(msg)
  }
}

impl From<regex::Error> for SmithError {
  fn from(err: regex::Error) -> Self {
    SmithError::message(format!("Invalid pattern: {}", err))
  }
}

impl From<glob::PatternError> for SmithError {
  fn from(err: glob::PatternError) -> Self {
    SmithError::message(format!("Invalid glob pattern: {}", err))
  }
}

impl From<toml_edit::de::Error> for SmithError {
  fn from(err: toml_edit::de::Error) -> Self {
    SmithError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for SmithError {
  fn from(err: serde_json::Error) -> Self {
    SmithError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but could not be parsed
  Parse { path: PathBuf, reason: String },

  /// A field holds a value gemsmith cannot work with
  InvalidValue { field: String, reason: String },

  /// The ignore file does not hold a usable pattern
  IgnorePattern { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { .. } => Some("Check gemsmith.toml against the documented [package], [scan] and [tools] tables.".to_string()),
      ConfigError::InvalidValue { field, .. } => Some(format!("Fix or remove `{}` in gemsmith.toml to use the default.", field)),
      ConfigError::IgnorePattern { path, .. } => Some(format!(
        "{} must hold a single regular expression (whitespace is removed before compiling).",
        path.display()
      )),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse config from {}: {}", path.display(), reason)
      }
      ConfigError::InvalidValue { field, reason } => {
        write!(f, "Invalid value for `{}`: {}", field, reason)
      }
      ConfigError::IgnorePattern { path, reason } => {
        write!(f, "Invalid ignore pattern in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "gemsmith only scans tracked files. Run `git init` and commit your sources first: {}",
        path.display()
      )),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Result type alias for gemsmith
pub type SmithResult<T> = Result<T, SmithError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> SmithResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> SmithResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<SmithError>,
{
  fn context(self, ctx: impl Into<String>) -> SmithResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> SmithResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &SmithError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
