//! Dependency discovery and metadata synthesis
//!
//! A scan walks the tracked files once:
//!
//! ```text
//! selector -> scanner -> { library resolver, command resolver } -> buckets -> declarations
//! ```
//!
//! Per-file and per-reference problems end up in [`ScanReport::diagnostics`]
//! and never stop the scan. Only a failed file listing or a version cache
//! conflict is returned as an error.

pub mod aggregate;
pub mod collaborators;
pub mod model;
pub mod resolve;
pub mod scanner;
pub mod selector;
pub mod synthesize;

use crate::core::config::ScanConfig;
use crate::core::error::{ResultExt, SmithResult};
use aggregate::Buckets;
use collaborators::{Collaborators, TrackedFiles};
use model::{Diagnostic, ReferenceKind, SourceFile, VersionRecord};
use resolve::{CommandResolver, LibraryResolver, VersionCache};
use scanner::StatementScanner;
use selector::SourceSelector;
use serde::Serialize;
use std::path::Path;
use synthesize::Declaration;

/// What a scan needs to know about the project
#[derive(Debug, Clone, Copy)]
pub struct ScanSettings<'a> {
  /// Working tree root; tracked paths are relative to it
  pub root: &'a Path,
  /// Gem name, used to drop self references
  pub package_name: &'a str,
  pub scan: &'a ScanConfig,
}

/// Mutable state of one scan run
#[derive(Debug, Default)]
pub struct ScanContext {
  pub versions: VersionCache,
  pub diagnostics: Vec<Diagnostic>,
}

impl ScanContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Log a diagnostic and keep it for the report
  pub(crate) fn warn(&mut self, diagnostic: Diagnostic) {
    tracing::warn!("{}", diagnostic);
    self.diagnostics.push(diagnostic);
  }
}

/// Result of a scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
  /// Number of files the selector accepted
  pub files_scanned: usize,
  pub versions: Vec<VersionRecord>,
  pub buckets: Buckets,
  pub declarations: Vec<Declaration>,
  pub diagnostics: Vec<Diagnostic>,
}

/// Source files the scan would read, with selector warnings
pub fn select_sources(
  settings: &ScanSettings<'_>,
  vcs: &dyn TrackedFiles,
) -> SmithResult<(Vec<SourceFile>, Vec<Diagnostic>)> {
  let tracked = vcs.list_tracked_files().context("Failed to list tracked files")?;
  let selector = SourceSelector::new(settings.root, settings.scan)?;

  let mut files = Vec::new();
  let mut ctx = ScanContext::new();
  for result in selector.select(tracked) {
    match result {
      Ok(file) => files.push(file),
      Err(diagnostic) => ctx.warn(diagnostic),
    }
  }
  Ok((files, ctx.diagnostics))
}

/// Run a full scan
pub fn scan(settings: &ScanSettings<'_>, collaborators: Collaborators<'_>) -> SmithResult<ScanReport> {
  let mut ctx = ScanContext::new();
  CommandResolver::seed_system(&mut ctx.versions, settings.scan.system_requirement())?;

  let (files, selector_diagnostics) = select_sources(settings, collaborators.vcs)?;
  ctx.diagnostics.extend(selector_diagnostics);
  tracing::info!("scanning {} source files", files.len());

  let scanner = StatementScanner::new()?;
  let mut libraries = LibraryResolver::new(settings.package_name, collaborators.packages)?;
  let mut commands = CommandResolver::new(collaborators.process, collaborators.which);
  let mut buckets = Buckets::default();

  for file in &files {
    tracing::debug!(path = %file.path.display(), role = %file.role, "scanning");
    for item in scanner.scan(settings.root, file) {
      let reference = match item {
        Ok(reference) => reference,
        Err(diagnostic) => {
          ctx.warn(diagnostic);
          continue;
        }
      };
      tracing::trace!(
        path = %reference.path.display(),
        line = reference.line,
        name = %reference.name,
        kind = ?reference.kind,
        "reference"
      );

      match reference.kind {
        ReferenceKind::Import => {
          let resolution = libraries.resolve(&reference.name, &mut ctx)?;
          if let Some(resolution) = resolution {
            buckets.add_library(reference.role, &resolution);
          }
        }
        ReferenceKind::Command => {
          let resolution = commands.resolve(&reference.name, &mut ctx.versions)?;
          buckets.add_command(reference.role, &resolution);
        }
      }
    }
  }

  tracing::debug!(
    queries = libraries.queries(),
    versions = ctx.versions.len(),
    "scan finished"
  );

  let declarations = synthesize::synthesize(&buckets, &ctx.versions);
  Ok(ScanReport {
    files_scanned: files.len(),
    versions: ctx.versions.records().cloned().collect(),
    buckets,
    declarations,
    diagnostics: ctx.diagnostics,
  })
}
