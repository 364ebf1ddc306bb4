//! System git backend
//!
//! gemsmith only needs a handful of read-only queries, each one a single
//! `git` subprocess with an isolated environment.

use crate::core::error::{GitError, ResultExt, SmithError, SmithResult};
use crate::deps::collaborators::TrackedFiles;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git
pub struct SystemGit {
  /// Working tree root; every query runs from here so paths come back
  /// relative to it, whichever subdirectory gemsmith was started in
  pub(crate) work_tree: PathBuf,

  /// Tracked paths matching this pattern are left out of `ls_files`
  ignore: Option<Regex>,
}

impl SystemGit {
  /// Open the git repository containing `path`
  pub fn open(path: &Path) -> SmithResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(SmithError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(SmithError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      work_tree: PathBuf::from(work_tree),
      ignore: None,
    })
  }

  /// Filter `ls_files` through an ignore pattern (see `.gemignore`)
  pub fn with_ignore(mut self, ignore: Option<Regex>) -> Self {
    self.ignore = ignore;
    self
  }

  /// Working tree root reported by git
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Tracked files, in git's order, minus anything the ignore pattern matches
  pub fn ls_files(&self) -> SmithResult<Vec<PathBuf>> {
    let stdout = self.query(&["ls-files"])?;
    let files = stdout
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty())
      .filter(|line| self.ignore.as_ref().is_none_or(|re| !re.is_match(line)))
      .map(PathBuf::from)
      .collect();
    Ok(files)
  }

  /// `git status --porcelain`, trimmed
  pub fn status_porcelain(&self) -> SmithResult<String> {
    Ok(self.query(&["status", "--porcelain"])?.trim().to_string())
  }

  /// `user.name`, empty when unset
  pub fn user_name(&self) -> String {
    self.config_value("user.name").unwrap_or_default()
  }

  /// `user.email`, empty when unset
  pub fn user_email(&self) -> String {
    self.config_value("user.email").unwrap_or_default()
  }

  fn config_value(&self, key: &str) -> Option<String> {
    let output = self.git_cmd().args(["config", key]).output().ok()?;
    if !output.status.success() {
      return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Run a git query and return stdout, failing on a non-zero exit
  fn query(&self, args: &[&str]) -> SmithResult<String> {
    let command = format!("git {}", args.join(" "));
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", command))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(SmithError::Git(GitError::CommandFailed {
        command,
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to the work tree root
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.work_tree);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}

impl TrackedFiles for SystemGit {
  fn list_tracked_files(&self) -> SmithResult<Vec<PathBuf>> {
    self.ls_files()
  }
}
