//! Gem project attributes
//!
//! Everything the gemspec needs that is not a dependency: name and version,
//! README-derived description and summary, author from git config, and the
//! gem files lying around from earlier builds.

pub mod gemspec;

use crate::core::context::ProjectContext;
use crate::core::error::SmithResult;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Files searched, in order, for a `VERSION = '...'` line
const VERSION_SOURCES: &[&str] = &["lib/*/version.rb", "lib/*.rb", "bin/*"];

/// Derived project attributes
#[derive(Debug, Clone)]
pub struct Project {
  pub wd: PathBuf,
  pub readme: PathBuf,
  pub description: Option<String>,
  pub summary: Option<String>,
  pub name: String,
  pub gemspec: String,
  pub version: Option<String>,
  pub date: String,
  pub author: Option<String>,
  pub email: Option<String>,
  /// Built gems in the project root
  pub gems: Vec<PathBuf>,
  /// Built gems under `pkg/`
  pub pkgems: Vec<PathBuf>,
  pub homepage: Option<String>,
  pub license: String,
}

type Accessor = fn(&Project) -> Option<String>;

/// Printable attributes, in display order; `None` means missing
pub const ATTRIBUTES: &[(&str, Accessor)] = &[
  ("wd", |p| Some(p.wd.display().to_string())),
  ("readme", |p| Some(p.readme.display().to_string())),
  ("description", |p| p.description.clone()),
  ("summary", |p| p.summary.clone()),
  ("name", |p| Some(p.name.clone())),
  ("gemspec", |p| Some(p.gemspec.clone())),
  ("version", |p| p.version.clone()),
  ("date", |p| Some(p.date.clone())),
  ("author", |p| p.author.clone()),
  ("email", |p| p.email.clone()),
  ("gems", |p| Some(join_paths(&p.gems))),
  ("pkgems", |p| Some(join_paths(&p.pkgems))),
];

fn join_paths(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}

impl Project {
  /// Derive every attribute from the working tree and git config
  ///
  /// Missing pieces (no README section, no VERSION line) are left as `None`
  /// rather than failing; `info --check` reports them.
  pub fn load(ctx: &ProjectContext) -> SmithResult<Self> {
    let root = &ctx.root;
    let package = &ctx.config.package;

    let readme = package.readme.clone();
    let (description, summary) = match fs::read_to_string(root.join(&readme)) {
      Ok(text) => description_and_summary(&text)?,
      Err(e) => {
        tracing::warn!("could not read {}: {}", readme.display(), e);
        (None, None)
      }
    };

    let author = non_empty(ctx.git.user_name());
    let name = ctx.package_name.clone();
    let homepage = package.homepage.clone().or_else(|| {
      author
        .as_ref()
        .map(|a| format!("https://github.com/{}/{}", a.to_lowercase(), name))
    });

    Ok(Self {
      wd: root.clone(),
      readme,
      description,
      summary,
      gemspec: format!("{}.gemspec", name),
      version: find_version(root)?,
      date: chrono::Local::now().format("%Y-%m-%d").to_string(),
      author,
      email: non_empty(ctx.git.user_email()),
      gems: glob_relative(root, "*.gem")?,
      pkgems: glob_relative(root, "pkg/*.gem")?,
      homepage,
      license: package.license.clone(),
      name,
    })
  }

  /// Names of attributes with no value
  pub fn missing(&self) -> Vec<&'static str> {
    ATTRIBUTES
      .iter()
      .filter(|(_, get)| get(self).is_none())
      .map(|(name, _)| *name)
      .collect()
  }
}

fn non_empty(value: String) -> Option<String> {
  let value = value.trim();
  if value.is_empty() { None } else { Some(value.to_string()) }
}

/// Description is the first two paragraphs of the README's DESCRIPTION
/// section, summary the first one.
pub fn description_and_summary(readme: &str) -> SmithResult<(Option<String>, Option<String>)> {
  let section = Regex::new(r"(?si)\n[=#]+\s*DESCRIPTION:?(.*?)\n[=#]")?;
  let Some(body) = section.captures(readme).and_then(|c| c.get(1)) else {
    return Ok((None, None));
  };

  let paragraphs: Vec<&str> = body
    .as_str()
    .trim()
    .split("\n\n")
    .map(str::trim)
    .filter(|p| !p.is_empty())
    .collect();
  if paragraphs.is_empty() {
    return Ok((None, None));
  }

  let description = paragraphs.iter().take(2).copied().collect::<Vec<_>>().join("\n\n");
  Ok((Some(description), Some(paragraphs[0].to_string())))
}

/// First `x.y.z` on any `VERSION =` line of the version sources
pub fn find_version(root: &Path) -> SmithResult<Option<String>> {
  let assignment = Regex::new(r"VERSION\s*=")?;
  let number = Regex::new(r"(\d+\.\d+\.\d+)")?;

  for pattern in VERSION_SOURCES {
    for path in glob_relative(root, pattern)? {
      // Executables may be binary; unreadable files are just skipped
      let Ok(text) = fs::read_to_string(root.join(&path)) else {
        continue;
      };
      let found = text
        .lines()
        .filter(|line| assignment.is_match(line))
        .find_map(|line| number.captures(line).map(|c| c[1].to_string()));
      if found.is_some() {
        tracing::debug!(path = %path.display(), version = ?found, "found version");
        return Ok(found);
      }
    }
  }
  Ok(None)
}

/// Sorted glob matches, relative to `root`
fn glob_relative(root: &Path, pattern: &str) -> SmithResult<Vec<PathBuf>> {
  let full = root.join(pattern);
  let mut matches: Vec<PathBuf> = glob::glob(&full.to_string_lossy())?
    .filter_map(Result::ok)
    .filter(|p| p.is_file())
    .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
    .collect();
  matches.sort();
  Ok(matches)
}
