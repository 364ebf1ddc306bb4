//! RubyGems wrapper
//!
//! Only `gem which` is needed: it maps a required path to the installed
//! file, whose directory carries the gem's name and version.

use crate::deps::collaborators::{PackageManager, ProcessRunner};
use std::io;

/// `gem` command line, run through a process runner
pub struct GemCli<'a> {
  program: String,
  process: &'a dyn ProcessRunner,
}

impl<'a> GemCli<'a> {
  pub fn new(program: impl Into<String>, process: &'a dyn ProcessRunner) -> Self {
    Self {
      program: program.into(),
      process,
    }
  }
}

impl PackageManager for GemCli<'_> {
  fn locate(&self, name: &str) -> io::Result<String> {
    let output = self.process.run(&self.program, &["which", name])?;
    // `gem which` exits non-zero for names it cannot place
    if !output.success {
      return Ok(String::new());
    }
    Ok(output.stdout)
  }
}
