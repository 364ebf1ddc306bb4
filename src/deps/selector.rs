//! Source selection: which tracked files are worth scanning

use crate::core::config::ScanConfig;
use crate::core::error::SmithResult;
use crate::deps::model::{Diagnostic, Role, SourceFile, SourceKind};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

/// Filters tracked paths down to Ruby sources
pub struct SourceSelector {
  root: PathBuf,
  suffixes: Vec<String>,
  distributed_roots: Vec<String>,
  shebang: Regex,
}

impl SourceSelector {
  pub fn new(root: &Path, scan: &ScanConfig) -> SmithResult<Self> {
    let shebang = Regex::new(&format!(r"^#!.*\b{}\b", regex::escape(&scan.shebang_runtime)))?;
    Ok(Self {
      root: root.to_path_buf(),
      suffixes: scan.source_suffixes.clone(),
      distributed_roots: scan.distributed_roots.clone(),
      shebang,
    })
  }

  /// Lazily select source files, keeping input order
  ///
  /// Candidates that fail with an I/O error come out as `Err` diagnostics;
  /// the caller logs them and keeps going.
  pub fn select<'a, I>(&'a self, paths: I) -> impl Iterator<Item = Result<SourceFile, Diagnostic>> + 'a
  where
    I: IntoIterator<Item = PathBuf>,
    I::IntoIter: 'a,
  {
    paths.into_iter().filter_map(move |path| match self.classify(&path) {
      Ok(Some(kind)) => Some(Ok(SourceFile {
        role: self.role_of(&path),
        kind,
        path,
      })),
      Ok(None) => None,
      Err(e) => Some(Err(Diagnostic::for_path(path, e.to_string()))),
    })
  }

  /// Decide whether one path is a source file
  pub fn classify(&self, path: &Path) -> io::Result<Option<SourceKind>> {
    let has_suffix = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| self.suffixes.iter().any(|s| s == ext));
    if has_suffix {
      return Ok(Some(SourceKind::Script));
    }

    let full_path = self.root.join(path);
    // Tracked but deleted from the working tree
    let Ok(metadata) = full_path.metadata() else {
      return Ok(None);
    };
    if !metadata.is_file() || !is_executable(&metadata) {
      return Ok(None);
    }

    let mut first_line = String::new();
    BufReader::new(File::open(&full_path)?).read_line(&mut first_line)?;
    if self.shebang.is_match(first_line.trim_end()) {
      Ok(Some(SourceKind::Shebang))
    } else {
      Ok(None)
    }
  }

  /// Distributed iff the first path component is a library or executable root
  pub fn role_of(&self, path: &Path) -> Role {
    match path.components().next() {
      Some(Component::Normal(first)) if self.distributed_roots.iter().any(|r| first == r.as_str()) => {
        Role::Distributed
      }
      _ => Role::Auxiliary,
    }
  }
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
  use std::os::unix::fs::PermissionsExt;
  metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
  false
}
