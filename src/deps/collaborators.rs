//! Interfaces the dependency engine consumes
//!
//! The engine never shells out directly. Git, RubyGems and process spawning
//! sit behind these traits so a scan can run against fakes in tests and the
//! real tools in `main`.

use crate::core::error::SmithResult;
use std::io;
use std::path::PathBuf;

/// Version-control collaborator
pub trait TrackedFiles {
  /// Tracked paths relative to the project root, ignore rules already applied.
  ///
  /// Failing to produce the list is fatal for a scan.
  fn list_tracked_files(&self) -> SmithResult<Vec<PathBuf>>;
}

/// Package-manager collaborator
pub trait PackageManager {
  /// Raw locate output for a required name (`gem which`), empty when unknown
  fn locate(&self, name: &str) -> io::Result<String>;
}

/// Captured result of running an external program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
  pub stdout: String,
  pub stderr: String,
  pub success: bool,
}

impl ProcessOutput {
  /// stdout followed by stderr, the way `cmd 2>&1` would read
  pub fn combined(&self) -> String {
    let mut combined = self.stdout.clone();
    if !combined.is_empty() && !combined.ends_with('\n') && !self.stderr.is_empty() {
      combined.push('\n');
    }
    combined.push_str(&self.stderr);
    combined
  }
}

/// Process collaborator
pub trait ProcessRunner {
  /// Run `program` with `args` to completion
  fn run(&self, program: &str, args: &[&str]) -> io::Result<ProcessOutput>;
}

/// Everything a scan talks to outside the working tree
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
  pub vcs: &'a dyn TrackedFiles,
  pub packages: &'a dyn PackageManager,
  pub process: &'a dyn ProcessRunner,
  /// Program used for `which`-style existence checks
  pub which: &'a str,
}
