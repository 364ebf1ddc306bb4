//! `gemsmith files`

use crate::core::context::ProjectContext;
use crate::core::error::SmithResult;
use crate::deps;

/// List the files a scan reads, with the role each one gets
pub fn run_files(ctx: &ProjectContext) -> SmithResult<()> {
  let (files, _diagnostics) = deps::select_sources(&ctx.scan_settings(), &ctx.git)?;

  for file in &files {
    println!("{:<12} {}", file.role.to_string(), file.path.display());
  }
  Ok(())
}
