//! System process runner backed by `std::process::Command`

use crate::deps::collaborators::{ProcessOutput, ProcessRunner};
use std::io;
use std::process::{Command, Stdio};

/// Runs programs from PATH, blocking until they exit
///
/// There is no timeout: a probe that never exits stalls the scan.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcess;

impl ProcessRunner for SystemProcess {
  fn run(&self, program: &str, args: &[&str]) -> io::Result<ProcessOutput> {
    tracing::trace!(program, ?args, "spawning");
    let output = Command::new(program)
      .args(args)
      .stdin(Stdio::null())
      .output()?;

    Ok(ProcessOutput {
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
      success: output.status.success(),
    })
  }
}
