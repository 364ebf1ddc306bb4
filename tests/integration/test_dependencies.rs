//! Tests for the `dependencies` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_runtime_gem_and_test_only_library() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "require 'alpha'\nrequire 'mygem/version'\n")?;
  project.write_file("lib/mygem/version.rb", "module Mygem\n  VERSION = '0.3.1'\nend\n")?;
  project.write_file("test/tc_mygem.rb", "require 'beta'\nrequire 'mygem'\n")?;
  project.commit("Initial gem")?;

  let output = project.run(&["dependencies"])?;
  let out = stdout(&output);
  assert!(out.contains("# runtime gems\nalpha: 2.3.1\n# development gems\n"));
  assert!(out.contains("# development libraries\nbeta\n"));
  assert!(!out.contains("mygem"));

  Ok(())
}

#[test]
fn test_command_version_from_stderr() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "listing = `foo --list`\n")?;
  project.commit("Initial gem")?;

  let output = project.run(&["dependencies"])?;
  assert!(stdout(&output).contains("# runtime requirements\nfoo: 9.9\n"));

  Ok(())
}

#[test]
fn test_unknown_command_is_a_system_requirement() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("test/tc_mygem.rb", "system('definitely-not-a-command-xyz --go')\n")?;
  project.commit("Initial gem")?;

  let output = project.run(&["dependencies"])?;
  assert!(stdout(&output).contains("# development requirements\nsystem: linux/bash\n"));

  Ok(())
}

#[test]
fn test_system_requirement_is_configurable() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_config("[scan]\nsystem_requirement = \"macos/zsh\"\n")?;
  project.write_file("lib/mygem.rb", "system 'definitely-not-a-command-xyz'\n")?;
  project.commit("Initial gem")?;

  let output = project.run(&["dependencies"])?;
  assert!(stdout(&output).contains("# runtime requirements\nsystem: macos/zsh\n"));

  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "require 'alpha'\n")?;
  project.write_file("test/tc_mygem.rb", "require 'minitest'\nrequire 'alpha'\n")?;
  project.commit("Initial gem")?;

  let output = project.run(&["dependencies", "--json"])?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(report["files_scanned"], 2);
  assert_eq!(report["buckets"]["gems"]["runtime"], serde_json::json!(["alpha"]));
  assert_eq!(
    report["buckets"]["gems"]["development"],
    serde_json::json!(["minitest", "alpha"])
  );
  let declarations = report["declarations"].as_array().unwrap();
  assert_eq!(declarations.len(), 2);
  assert_eq!(declarations[0]["kind"], "runtime-dependency");
  assert_eq!(declarations[1]["kind"], "development-dependency");
  assert_eq!(declarations[1]["name"], "minitest");

  Ok(())
}

#[test]
fn test_conflicting_versions_abort_with_software_error() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "require 'alpha'\nrequire 'alpha/extra'\n")?;
  project.commit("Initial gem")?;

  let output = project.run_unchecked(&["dependencies"])?;
  assert_eq!(output.status.code(), Some(70));
  assert!(stderr(&output).contains("alpha"));

  Ok(())
}

#[test]
fn test_invalid_config_is_usage_error() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_config("[scan]\nsource_suffixes = [\".rb\"]\n")?;
  project.commit("Initial gem")?;

  let output = project.run_unchecked(&["dependencies"])?;
  assert_eq!(output.status.code(), Some(64));
  assert!(stderr(&output).contains("scan.source_suffixes"));

  Ok(())
}

#[test]
fn test_outside_git_is_unavailable() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  let output = run_gemsmith(dir.path(), &["dependencies"], None)?;
  assert_eq!(output.status.code(), Some(69));

  Ok(())
}

#[test]
fn test_two_runs_print_the_same() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "require 'alpha'\nrequire 'json'\n`foo`\n")?;
  project.write_file("test/tc_mygem.rb", "require 'minitest'\n# `definitely-not-a-command-xyz`\n")?;
  project.commit("Initial gem")?;

  let first = project.run(&["dependencies"])?;
  let second = project.run(&["dependencies"])?;
  assert_eq!(first.stdout, second.stdout);

  Ok(())
}

#[test]
fn test_run_from_subdirectory_matches_root() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "require 'alpha'\n`foo`\n")?;
  project.write_file("test/tc_mygem.rb", "require 'minitest'\n")?;
  project.commit("Initial gem")?;

  let at_root = project.run(&["dependencies"])?;
  let nested = run_gemsmith(&project.path.join("lib"), &["dependencies"], Some(&project.tools))?;
  assert!(nested.status.success(), "stderr: {}", stderr(&nested));
  assert_eq!(stdout(&nested), stdout(&at_root));
  assert!(stdout(&nested).contains("# runtime gems\nalpha: 2.3.1\n"));
  assert!(!stderr(&nested).contains("could not process"));

  Ok(())
}
