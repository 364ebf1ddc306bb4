//! `gemsmith gemspec`

use crate::core::context::ProjectContext;
use crate::core::error::SmithResult;
use crate::deps;
use crate::project::{Project, gemspec};

/// Scan dependencies and write `<name>.gemspec` (or print it)
pub fn run_gemspec(ctx: &ProjectContext, stdout: bool) -> SmithResult<()> {
  let project = Project::load(ctx)?;
  let report = ctx.with_collaborators(|collaborators| deps::scan(&ctx.scan_settings(), collaborators))?;
  let files = ctx.git.ls_files()?;

  let content = gemspec::render(&project, &files, &report.declarations)?;
  if stdout {
    print!("{}", content);
    return Ok(());
  }

  let path = gemspec::write(&ctx.root, &project, &content)?;
  println!(
    "✅ Wrote {} ({} dependency lines)",
    path.strip_prefix(&ctx.root).unwrap_or(&path).display(),
    report.declarations.len()
  );
  Ok(())
}
