use crate::core::error::{ConfigError, ResultExt, SmithError, SmithResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for gemsmith
/// Searched in order: gemsmith.toml, .gemsmith.toml, .config/gemsmith.toml
///
/// Every table is optional; a project without a config file runs on defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SmithConfig {
  #[serde(default)]
  pub package: PackageConfig,
  #[serde(default)]
  pub scan: ScanConfig,
  #[serde(default)]
  pub tools: ToolsConfig,
}

/// Descriptor fields that cannot be derived from the working tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
  /// Gem name (default: directory name up to the first `-`)
  #[serde(default)]
  pub name: Option<String>,

  /// SPDX license identifier written to the gemspec
  #[serde(default = "default_license")]
  pub license: String,

  /// Homepage (default: `https://github.com/<author>/<name>`)
  #[serde(default)]
  pub homepage: Option<String>,

  /// README holding the DESCRIPTION section
  #[serde(default = "default_readme")]
  pub readme: PathBuf,
}

fn default_license() -> String {
  "MIT".to_string()
}

fn default_readme() -> PathBuf {
  PathBuf::from("README.md")
}

impl Default for PackageConfig {
  fn default() -> Self {
    Self {
      name: None,
      license: default_license(),
      homepage: None,
      readme: default_readme(),
    }
  }
}

/// Dependency scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
  /// Top-level directories whose files ship with the gem
  #[serde(default = "default_distributed_roots")]
  pub distributed_roots: Vec<String>,

  /// File extensions scanned regardless of permissions
  #[serde(default = "default_source_suffixes")]
  pub source_suffixes: Vec<String>,

  /// Interpreter name looked for in shebang lines of extensionless executables
  #[serde(default = "default_shebang_runtime")]
  pub shebang_runtime: String,

  /// File holding a regex of tracked paths to leave out of the gem
  #[serde(default = "default_ignore_file")]
  pub ignore_file: PathBuf,

  /// Version recorded for the `system` fallback requirement (empty = unresolved)
  #[serde(default = "default_system_requirement")]
  pub system_requirement: String,
}

fn default_distributed_roots() -> Vec<String> {
  vec!["lib".to_string(), "bin".to_string()]
}

fn default_source_suffixes() -> Vec<String> {
  vec!["rb".to_string(), "thor".to_string()]
}

fn default_shebang_runtime() -> String {
  "ruby".to_string()
}

fn default_ignore_file() -> PathBuf {
  PathBuf::from(".gemignore")
}

fn default_system_requirement() -> String {
  "linux/bash".to_string()
}

impl Default for ScanConfig {
  fn default() -> Self {
    Self {
      distributed_roots: default_distributed_roots(),
      source_suffixes: default_source_suffixes(),
      shebang_runtime: default_shebang_runtime(),
      ignore_file: default_ignore_file(),
      system_requirement: default_system_requirement(),
    }
  }
}

impl ScanConfig {
  /// Validate scan configuration
  pub fn validate(&self) -> SmithResult<()> {
    if self.distributed_roots.iter().all(|r| r.trim().is_empty()) {
      return Err(invalid("scan.distributed_roots", "at least one root directory is required"));
    }

    if self.source_suffixes.iter().all(|s| s.trim().is_empty()) {
      return Err(invalid("scan.source_suffixes", "at least one file extension is required"));
    }

    if let Some(suffix) = self.source_suffixes.iter().find(|s| s.starts_with('.')) {
      return Err(invalid(
        "scan.source_suffixes",
        format!("'{}' must be given without the leading dot", suffix),
      ));
    }

    if self.shebang_runtime.is_empty() || !self.shebang_runtime.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
      return Err(invalid(
        "scan.shebang_runtime",
        format!("'{}' must be a plain interpreter name such as 'ruby'", self.shebang_runtime),
      ));
    }

    Ok(())
  }

  /// The `system` fallback requirement, if one is configured
  pub fn system_requirement(&self) -> Option<&str> {
    let value = self.system_requirement.trim();
    if value.is_empty() { None } else { Some(value) }
  }
}

/// External programs gemsmith shells out to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
  /// RubyGems executable used for `gem which`
  #[serde(default = "default_gem")]
  pub gem: String,

  /// Program used to test whether a command is on PATH
  #[serde(default = "default_which")]
  pub which: String,
}

fn default_gem() -> String {
  "gem".to_string()
}

fn default_which() -> String {
  "which".to_string()
}

impl Default for ToolsConfig {
  fn default() -> Self {
    Self {
      gem: default_gem(),
      which: default_which(),
    }
  }
}

fn invalid(field: &str, reason: impl Into<String>) -> SmithError {
  SmithError::Config(ConfigError::InvalidValue {
    field: field.to_string(),
    reason: reason.into(),
  })
}

impl SmithConfig {
  /// Find config file in search order: gemsmith.toml, .gemsmith.toml, .config/gemsmith.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("gemsmith.toml"),
      path.join(".gemsmith.toml"),
      path.join(".config").join("gemsmith.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the first file found, or fall back to defaults
  pub fn load(path: &Path) -> SmithResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no gemsmith.toml found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).map_err(|e| {
      SmithError::Config(ConfigError::Parse {
        path: config_path.clone(),
        reason: e.to_string(),
      })
    })?;

    config
      .scan
      .validate()
      .with_context(|| format!("Invalid scan configuration in {}", config_path.display()))?;

    Ok(config)
  }

  fn parse(content: &str) -> Result<Self, toml_edit::de::Error> {
    toml_edit::de::from_str(content)
  }

  /// Compile the ignore file into a path filter, if the project has one
  ///
  /// The file's contents, with all whitespace removed, form one regex;
  /// tracked paths it matches are left out of the gem.
  pub fn ignore_filter(&self, root: &Path) -> SmithResult<Option<Regex>> {
    let ignore_path = root.join(&self.scan.ignore_file);
    if !ignore_path.is_file() {
      return Ok(None);
    }

    let content = fs::read_to_string(&ignore_path)
      .with_context(|| format!("Failed to read ignore file {}", ignore_path.display()))?;
    let pattern: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    if pattern.is_empty() {
      return Ok(None);
    }

    Regex::new(&pattern).map(Some).map_err(|e| {
      SmithError::Config(ConfigError::IgnorePattern {
        path: ignore_path,
        reason: e.to_string(),
      })
    })
  }
}
