//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const README: &str = "# mygem\n\n## DESCRIPTION:\n\nMygem keeps things tidy.\n\nIt does so quietly.\n\n## INSTALL:\n\n    gem install mygem\n";

/// A gem project under git, plus a directory of fake tools kept outside it
pub struct GemProject {
  _root: TempDir,
  pub path: PathBuf,
  pub tools: PathBuf,
}

impl GemProject {
  /// Create `<tmp>/<dir_name>` as a git repo with a README and config
  ///
  /// The fake `gem` knows `alpha` (2.3.1) and `alpha/extra` (2.4.0); the
  /// fake tool directory also holds `foo`, which only reports its version
  /// on stderr for `-v`.
  pub fn new(dir_name: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join(dir_name);
    let tools = root.path().join("tools");
    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(&tools)?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    write_script(
      &tools.join("gem"),
      r#"#!/bin/sh
[ "$1" = which ] || exit 1
case "$2" in
  alpha) echo "/gems/alpha-2.3.1/lib/alpha.rb" ;;
  alpha/extra) echo "/gems/alpha-2.4.0/lib/alpha/extra.rb" ;;
  minitest) echo "/gems/minitest-5.20.0/lib/minitest.rb" ;;
  *) echo "ERROR:  Can't find Ruby library file or shared library $2" >&2; exit 1 ;;
esac
"#,
    )?;
    write_script(&tools.join("which"), "#!/bin/sh\ncommand -v \"$1\" >/dev/null 2>&1\n")?;
    write_script(
      &tools.join("foo"),
      "#!/bin/sh\n[ \"$1\" = -v ] && echo \"foo version 9.9\" >&2\nexit 0\n",
    )?;

    let project = Self { _root: root, path, tools };
    project.write_config("")?;
    project.write_file("README.md", README)?;
    Ok(project)
  }

  /// Write gemsmith.toml pointing at the fake tools, plus `extra` TOML
  pub fn write_config(&self, extra: &str) -> Result<()> {
    let config = format!(
      "[tools]\ngem = \"{}\"\nwhich = \"{}\"\n{}",
      self.tools.join("gem").display(),
      self.tools.join("which").display(),
      extra
    );
    self.write_file("gemsmith.toml", &config)
  }

  /// Write a file, creating parent directories
  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let path = self.path.join(rel);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Write an executable file
  pub fn write_executable(&self, rel: &str, content: &str) -> Result<()> {
    self.write_file(rel, content)?;
    write_script(&self.path.join(rel), content)
  }

  /// Stage everything and commit
  pub fn commit(&self, message: &str) -> Result<()> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Run gemsmith in the project with the fake tools first on PATH
  pub fn run(&self, args: &[&str]) -> Result<Output> {
    let output = self.run_unchecked(args)?;
    if !output.status.success() {
      anyhow::bail!(
        "gemsmith command failed: gemsmith {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        stdout(&output),
        stderr(&output)
      );
    }
    Ok(output)
  }

  /// Like `run`, but hand back failing output too
  pub fn run_unchecked(&self, args: &[&str]) -> Result<Output> {
    run_gemsmith(&self.path, args, Some(&self.tools))
  }
}

fn write_script(path: &Path, content: &str) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  std::fs::write(path, content)?;
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
  Ok(())
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the gemsmith binary, optionally prepending a directory to PATH
pub fn run_gemsmith(cwd: &Path, args: &[&str], extra_path: Option<&Path>) -> Result<Output> {
  let gemsmith_bin = env!("CARGO_BIN_EXE_gemsmith");

  let mut command = Command::new(gemsmith_bin);
  command.current_dir(cwd).args(args).env_remove("GEMSMITH_LOG");
  if let Some(dir) = extra_path {
    let path = std::env::var_os("PATH").unwrap_or_default();
    let mut dirs = vec![dir.to_path_buf()];
    dirs.extend(std::env::split_paths(&path));
    command.env("PATH", std::env::join_paths(dirs)?);
  }

  command.output().context("Failed to run gemsmith")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
