//! Tests for the `info` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_info_prints_attributes() -> Result<()> {
  let project = GemProject::new("mygem-0.3")?;
  project.write_file("lib/mygem/version.rb", "module Mygem\n  VERSION = '0.3.1'\nend\n")?;
  project.write_file("pkg/mygem-0.3.0.gem", "")?;
  project.commit("Initial gem")?;

  let output = project.run(&["info", "--check"])?;
  let out = stdout(&output);
  let value = |name: &str| {
    out
      .lines()
      .find(|l| l.starts_with(&format!("{}:", name)))
      .map(|l| l[16..].to_string())
  };

  assert_eq!(value("name").as_deref(), Some("mygem"));
  assert_eq!(value("gemspec").as_deref(), Some("mygem.gemspec"));
  assert_eq!(value("version").as_deref(), Some("0.3.1"));
  assert_eq!(value("summary").as_deref(), Some("Mygem keeps things tidy."));
  assert_eq!(value("author").as_deref(), Some("Test User"));
  assert_eq!(value("pkgems").as_deref(), Some("pkg/mygem-0.3.0.gem"));
  assert_eq!(value("gems").as_deref(), Some(""));

  Ok(())
}

#[test]
fn test_info_check_reports_missing_attributes() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("README.md", "# mygem\n\nNo description section.\n")?;
  project.write_file("lib/mygem.rb", "module Mygem; end\n")?;
  project.commit("Initial gem")?;

  let listing = project.run(&["info"])?;
  assert!(stdout(&listing).contains("description:"));

  let output = project.run_unchecked(&["info", "--check"])?;
  assert_eq!(output.status.code(), Some(65));
  let err = stderr(&output);
  assert!(err.contains("description undefined"));
  assert!(err.contains("version undefined"));
  assert!(!err.contains("author undefined"));

  Ok(())
}
