//! Version resolution for required libraries and external commands
//!
//! Both resolvers memoize per raw key, so each distinct name costs at most
//! one `gem which` or one round of command probes per scan. Every answer is
//! written to the run's [`VersionCache`], which refuses to hold two
//! different versions for the same key.

use crate::core::error::{SmithError, SmithResult};
use crate::deps::ScanContext;
use crate::deps::collaborators::{PackageManager, ProcessRunner};
use crate::deps::model::{Diagnostic, ResolutionSource, VersionKey, VersionRecord};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// Label unresolved commands are filed under
pub const SYSTEM_LABEL: &str = "system";

/// One version record per key for the whole run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VersionCache {
  records: BTreeMap<VersionKey, VersionRecord>,
}

impl VersionCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &VersionKey) -> Option<&VersionRecord> {
    self.records.get(key)
  }

  /// Resolved version for a key, if any
  pub fn version(&self, key: &VersionKey) -> Option<&str> {
    self.get(key).and_then(|r| r.version.as_deref())
  }

  /// Store a record; a second, different answer for the same key is fatal
  pub fn record(&mut self, record: VersionRecord) -> SmithResult<()> {
    if let Some(existing) = self.records.get(&record.key) {
      if existing.version != record.version {
        return Err(SmithError::invariant(format!(
          "'{}' resolved to both {:?} and {:?} in one run",
          record.key, existing.version, record.version
        )));
      }
      return Ok(());
    }
    self.records.insert(record.key.clone(), record);
    Ok(())
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Records in key order
  pub fn records(&self) -> impl Iterator<Item = &VersionRecord> {
    self.records.values()
  }
}

/// What a required name turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryResolution {
  /// An installed gem, under the name RubyGems reports
  Gem { name: String, version: String },
  /// Anything RubyGems cannot place: standard library or built-in
  Builtin { name: String },
}

/// Maps `require` names to gems via the package manager
pub struct LibraryResolver<'a> {
  package_name: String,
  manager: &'a dyn PackageManager,
  locate_pattern: Regex,
  memo: HashMap<String, LibraryResolution>,
  queries: usize,
}

impl<'a> LibraryResolver<'a> {
  pub fn new(package_name: &str, manager: &'a dyn PackageManager) -> SmithResult<Self> {
    Ok(Self {
      package_name: package_name.to_string(),
      manager,
      locate_pattern: Regex::new(r"\b([\w\-]+)-(\d+\.\d+(?:\.\d+)?)\b")?,
      memo: HashMap::new(),
      queries: 0,
    })
  }

  /// `name` or `name/...` belong to the gem being described
  pub fn is_self_reference(&self, raw: &str) -> bool {
    raw
      .strip_prefix(&self.package_name)
      .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
  }

  /// Resolve a raw required name; `None` for self references
  pub fn resolve(
    &mut self,
    raw: &str,
    ctx: &mut ScanContext,
  ) -> SmithResult<Option<LibraryResolution>> {
    if self.is_self_reference(raw) {
      return Ok(None);
    }
    if let Some(resolution) = self.memo.get(raw) {
      return Ok(Some(resolution.clone()));
    }

    self.queries += 1;
    let located = match self.manager.locate(raw) {
      Ok(output) => output,
      Err(e) => {
        ctx.warn(Diagnostic::general(format!("could not locate '{}': {}", raw, e)));
        String::new()
      }
    };

    let resolution = match self.parse_located(&located) {
      Some((name, version)) => {
        tracing::debug!(required = raw, gem = %name, %version, "resolved gem");
        ctx.versions.record(VersionRecord {
          key: VersionKey::Gem(name.clone()),
          version: Some(version.clone()),
          source: ResolutionSource::PackageManager,
        })?;
        LibraryResolution::Gem { name, version }
      }
      None => {
        tracing::debug!(required = raw, "no gem found, treating as built-in");
        ctx.versions.record(VersionRecord {
          key: VersionKey::Library(raw.to_string()),
          version: None,
          source: ResolutionSource::NotFound,
        })?;
        LibraryResolution::Builtin { name: raw.to_string() }
      }
    };

    self.memo.insert(raw.to_string(), resolution.clone());
    Ok(Some(resolution))
  }

  /// First `name-major.minor[.patch]` in the locate output
  fn parse_located(&self, located: &str) -> Option<(String, String)> {
    let caps = self.locate_pattern.captures(located)?;
    Some((caps[1].to_string(), caps[2].to_string()))
  }

  /// Package-manager queries issued so far
  pub fn queries(&self) -> usize {
    self.queries
  }
}

/// Where an external command ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResolution {
  /// The command token, or [`SYSTEM_LABEL`] when no version could be pinned
  pub label: String,
  pub version: Option<String>,
}

/// Probes installed commands for their versions
pub struct CommandResolver<'a> {
  process: &'a dyn ProcessRunner,
  which: String,
  memo: HashMap<String, CommandResolution>,
}

impl<'a> CommandResolver<'a> {
  pub fn new(process: &'a dyn ProcessRunner, which: &str) -> Self {
    Self {
      process,
      which: which.to_string(),
      memo: HashMap::new(),
    }
  }

  /// Seed the version of the `system` fallback requirement
  pub fn seed_system(cache: &mut VersionCache, version: Option<&str>) -> SmithResult<()> {
    cache.record(VersionRecord {
      key: VersionKey::Command(SYSTEM_LABEL.to_string()),
      version: version.map(str::to_string),
      source: match version {
        Some(_) => ResolutionSource::Configured,
        None => ResolutionSource::NotFound,
      },
    })
  }

  /// Resolve a command token, probing at most once per token
  pub fn resolve(&mut self, command: &str, cache: &mut VersionCache) -> SmithResult<CommandResolution> {
    if let Some(resolution) = self.memo.get(command) {
      return Ok(resolution.clone());
    }

    let key = VersionKey::Command(command.to_string());
    let record = match cache.get(&key).cloned() {
      // Seeded ahead of time (the `system` label itself)
      Some(existing) => existing,
      None => {
        let record = self.probe(command, key);
        cache.record(record.clone())?;
        record
      }
    };

    let resolution = match record.version {
      Some(version) => CommandResolution {
        label: command.to_string(),
        version: Some(version),
      },
      None => CommandResolution {
        label: SYSTEM_LABEL.to_string(),
        version: cache.version(&VersionKey::Command(SYSTEM_LABEL.to_string())).map(str::to_string),
      },
    };

    self.memo.insert(command.to_string(), resolution.clone());
    Ok(resolution)
  }

  fn probe(&self, command: &str, key: VersionKey) -> VersionRecord {
    if !self.on_path(command) {
      tracing::debug!(command, "not found on PATH");
      return VersionRecord {
        key,
        version: None,
        source: ResolutionSource::NotFound,
      };
    }

    let version = self.probe_version(command);
    tracing::debug!(command, version = ?version, "probed command");
    VersionRecord {
      key,
      source: if version.is_some() {
        ResolutionSource::CommandProbe
      } else {
        ResolutionSource::NotFound
      },
      version,
    }
  }

  fn on_path(&self, command: &str) -> bool {
    self
      .process
      .run(&self.which, &[command])
      .is_ok_and(|output| output.success)
  }

  /// `--version` first line, then `-v` last token, then `-v 2>&1` last token
  fn probe_version(&self, command: &str) -> Option<String> {
    let run = |flag: &str| self.process.run(command, &[flag]).ok();

    let first_line = run("--version").and_then(|out| first_line(&out.stdout));
    if first_line.is_some() {
      return first_line;
    }

    let v_output = run("-v");
    let last_stdout = v_output.as_ref().and_then(|out| last_token(&out.stdout));
    if last_stdout.is_some() {
      return last_stdout;
    }

    v_output.and_then(|out| last_token(&out.combined()))
  }
}

fn first_line(text: &str) -> Option<String> {
  text.trim().lines().next().map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
}

fn last_token(text: &str) -> Option<String> {
  text.split_whitespace().last().map(str::to_string)
}
