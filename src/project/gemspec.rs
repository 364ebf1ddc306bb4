//! Gemspec rendering

use crate::core::error::{ResultExt, SmithError, SmithResult};
use crate::deps::synthesize::Declaration;
use crate::project::Project;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Render `<name>.gemspec`
///
/// `files` are the tracked files shipped with the gem; `bin/<name>` among
/// them makes the gem declare an executable.
pub fn render(project: &Project, files: &[PathBuf], declarations: &[Declaration]) -> SmithResult<String> {
  let required = [
    ("version", &project.version),
    ("description", &project.description),
    ("summary", &project.summary),
    ("author", &project.author),
    ("email", &project.email),
  ];
  let missing: Vec<&str> = required
    .iter()
    .filter(|(_, value)| value.is_none())
    .map(|(name, _)| *name)
    .collect();
  if !missing.is_empty() {
    return Err(SmithError::with_help(
      format!("Cannot write {}: missing {}", project.gemspec, missing.join(", ")),
      "Run `gemsmith info --check` to see which project attributes are undefined",
    ));
  }

  let mut out = String::new();
  write_gemspec(&mut out, project, files, declarations)
    .map_err(|e| SmithError::message(format!("Failed to format {}: {}", project.gemspec, e)))?;
  Ok(out)
}

fn write_gemspec(
  out: &mut impl fmt::Write,
  project: &Project,
  files: &[PathBuf],
  declarations: &[Declaration],
) -> fmt::Result {
  let field = |value: &Option<String>| value.clone().unwrap_or_default();
  let author = field(&project.author);
  let homepage = project
    .homepage
    .clone()
    .unwrap_or_else(|| format!("https://github.com/{}/{}", author.to_lowercase(), project.name));
  let executable = Path::new("bin").join(&project.name);

  write!(
    out,
    "Gem::Specification.new do |s|

  s.name     = '{name}'
  s.version  = '{version}'

  s.homepage = '{homepage}'

  s.author   = '{author}'
  s.email    = '{email}'

  s.date     = '{date}'
  s.licenses = ['{license}']

  s.description = <<DESCRIPTION
{description}
DESCRIPTION

  s.summary = <<SUMMARY
{summary}
SUMMARY

  s.require_paths = ['lib']
  s.files = %w(
",
    name = project.name,
    version = field(&project.version),
    homepage = homepage,
    author = author,
    email = field(&project.email),
    date = project.date,
    license = project.license,
    description = field(&project.description),
    summary = field(&project.summary),
  )?;
  for file in files {
    writeln!(out, "{}", file.display())?;
  }
  writeln!(out, "  )")?;
  if files.iter().any(|f| *f == executable) {
    writeln!(out, "  s.executables << '{}'", project.name)?;
  }
  for declaration in declarations {
    writeln!(out, "  {}", declaration)?;
  }
  writeln!(out, "end")
}

/// Write the rendered gemspec into the project root
pub fn write(root: &Path, project: &Project, content: &str) -> SmithResult<PathBuf> {
  let path = root.join(&project.gemspec);
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}
