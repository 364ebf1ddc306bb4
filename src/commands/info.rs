//! `gemsmith info`

use crate::core::context::ProjectContext;
use crate::core::error::{SmithError, SmithResult};
use crate::project::{ATTRIBUTES, Project};

/// Print every project attribute; with `check`, fail if any is undefined
pub fn run_info(ctx: &ProjectContext, check: bool) -> SmithResult<()> {
  let project = Project::load(ctx)?;

  for (name, get) in ATTRIBUTES {
    let label = format!("{}:", name);
    println!("{:<16}{}", label, get(&project).unwrap_or_default());
  }

  if check {
    let missing = project.missing();
    for name in &missing {
      eprintln!("{} undefined", name);
    }
    if !missing.is_empty() {
      return Err(SmithError::with_help(
        "Project had missing attributes",
        "Add a DESCRIPTION section to the README, a VERSION constant under lib/, and git user.name/user.email",
      ));
    }
  }
  Ok(())
}
