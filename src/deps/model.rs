//! Scan-run data model
//!
//! Everything here lives for one scan and is thrown away afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Whether a file ships with the gem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  /// Under a library or executable root: a runtime concern
  Distributed,
  /// Tests, tasks and other tooling: a development concern
  Auxiliary,
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Role::Distributed => write!(f, "runtime"),
      Role::Auxiliary => write!(f, "development"),
    }
  }
}

/// How a file was recognized as source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
  /// Matched a source suffix
  Script,
  /// Executable whose shebang names the runtime
  Shebang,
}

/// A file selected for scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
  /// Path relative to the project root
  pub path: PathBuf,
  pub role: Role,
  pub kind: SourceKind,
}

/// What a matched line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
  Import,
  Command,
}

/// One occurrence of an import or command in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
  pub kind: ReferenceKind,
  /// Name exactly as written
  pub name: String,
  /// File the reference came from, relative to the project root
  pub path: PathBuf,
  /// Role of that file
  pub role: Role,
  /// 1-based line number
  pub line: usize,
}

/// Key of a version record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum VersionKey {
  /// Installed gem, keyed by the name RubyGems reports
  Gem(String),
  /// Required name RubyGems could not place
  Library(String),
  /// External command, keyed by its token (or the `system` label)
  Command(String),
}

impl fmt::Display for VersionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionKey::Gem(name) | VersionKey::Library(name) => write!(f, "{}", name),
      VersionKey::Command(name) => write!(f, ".{}", name),
    }
  }
}

/// Where a version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionSource {
  PackageManager,
  CommandProbe,
  NotFound,
  /// Seeded from configuration rather than discovered
  Configured,
}

/// Resolved version for one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
  pub key: VersionKey,
  pub version: Option<String>,
  pub source: ResolutionSource,
}

/// Non-fatal problem met during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
  pub path: Option<PathBuf>,
  pub message: String,
}

impl Diagnostic {
  pub fn for_path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
    Self {
      path: Some(path.into()),
      message: message.into(),
    }
  }

  pub fn general(message: impl Into<String>) -> Self {
    Self {
      path: None,
      message: message.into(),
    }
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.path {
      Some(path) => write!(f, "could not process {}: {}", path.display(), self.message),
      None => write!(f, "{}", self.message),
    }
  }
}
