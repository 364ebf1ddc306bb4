//! Project context - build once, pass everywhere
//!
//! ```text
//! main.rs:
//!   ProjectContext::build() -> &ProjectContext
//!   |
//!   v
//! commands/files.rs, dependencies.rs, etc:
//!   fn run_*(ctx: &ProjectContext, ...)
//!   |
//!   v
//! main.rs:
//!   ctx.end_of_run()
//! ```

use crate::core::config::SmithConfig;
use crate::core::error::{ResultExt, SmithResult};
use crate::core::process::SystemProcess;
use crate::core::vcs::SystemGit;
use crate::deps::ScanSettings;
use crate::deps::collaborators::Collaborators;
use crate::gem::GemCli;
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Shared project-level state for one invocation
pub struct ProjectContext {
  /// Git work tree root (absolute path)
  pub root: PathBuf,

  /// gemsmith.toml, or defaults
  pub config: SmithConfig,

  /// Git handle with the project's ignore filter applied
  pub git: SystemGit,

  /// Gem name, from config or the directory name
  pub package_name: String,

  process: SystemProcess,

  /// Set once the end-of-run status report has been printed
  warned: Cell<bool>,
}

impl ProjectContext {
  /// Build the context for the git work tree containing `start`
  pub fn build(start: &Path) -> SmithResult<Self> {
    let git = SystemGit::open(start)?;
    let root = git.work_tree().to_path_buf();
    let config = SmithConfig::load(&root)?;
    let ignore = config.ignore_filter(&root)?;
    let git = git.with_ignore(ignore);

    let package_name = match &config.package.name {
      Some(name) => name.clone(),
      None => package_name_from_dir(&root)
        .with_context(|| format!("Cannot derive a gem name from {}", root.display()))?,
    };
    tracing::debug!(root = %root.display(), package = %package_name, "project context ready");

    Ok(Self {
      root,
      config,
      git,
      package_name,
      process: SystemProcess,
      warned: Cell::new(false),
    })
  }

  /// Settings for a dependency scan of this project
  pub fn scan_settings(&self) -> ScanSettings<'_> {
    ScanSettings {
      root: &self.root,
      package_name: &self.package_name,
      scan: &self.config.scan,
    }
  }

  /// Hand a scan the real git, gem and process collaborators
  pub fn with_collaborators<T>(&self, f: impl FnOnce(Collaborators<'_>) -> T) -> T {
    let gems = GemCli::new(self.config.tools.gem.as_str(), &self.process);
    f(Collaborators {
      vcs: &self.git,
      packages: &gems,
      process: &self.process,
      which: &self.config.tools.which,
    })
  }

  /// Report uncommitted changes on stderr, at most once per run
  pub fn end_of_run(&self) {
    if self.warned.replace(true) {
      return;
    }
    let status = match self.git.status_porcelain() {
      Ok(status) => status,
      Err(e) => {
        tracing::debug!("skipping status report: {}", e);
        return;
      }
    };
    if status.trim().is_empty() {
      return;
    }

    let style = anstyle::Style::new()
      .bold()
      .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)));
    eprintln!("{}Uncommitted changes:{}", style.render(), style.render_reset());
    eprint!("{}", status);
    if !status.ends_with('\n') {
      eprintln!();
    }
  }
}

/// `foo-1.2` and `foo-bar` both name the gem `foo`
fn package_name_from_dir(root: &Path) -> SmithResult<String> {
  let dir = root
    .file_name()
    .and_then(|n| n.to_str())
    .ok_or("work tree has no usable directory name")?;
  match dir.split('-').next() {
    Some(name) if !name.is_empty() => Ok(name.to_string()),
    _ => Err(format!("'{}' does not start with a gem name", dir).into()),
  }
}
