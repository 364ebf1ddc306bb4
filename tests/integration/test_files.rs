//! Tests for the `files` command and the end-of-run status report

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_files_lists_sources_with_roles() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "module Mygem; end\n")?;
  project.write_file("test/tc_mygem.rb", "require 'mygem'\n")?;
  project.write_file("tasks.thor", "class Tasks < Thor; end\n")?;
  project.write_executable("bin/mygem", "#!/usr/bin/env ruby\nrequire 'mygem'\n")?;
  project.write_executable("bin/helper", "#!/bin/sh\necho hi\n")?;
  project.commit("Initial gem")?;

  let output = project.run(&["files"])?;
  let lines: Vec<String> = stdout(&output).lines().map(|l| l.split_whitespace().collect::<Vec<_>>().join(" ")).collect();

  assert!(lines.contains(&"runtime bin/mygem".to_string()));
  assert!(lines.contains(&"runtime lib/mygem.rb".to_string()));
  assert!(lines.contains(&"development tasks.thor".to_string()));
  assert!(lines.contains(&"development test/tc_mygem.rb".to_string()));
  assert!(!lines.iter().any(|l| l.contains("bin/helper") || l.contains("README.md")));

  Ok(())
}

#[test]
fn test_gemignore_hides_files() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "module Mygem; end\n")?;
  project.write_file("test/tc_mygem.rb", "require 'mygem'\n")?;
  project.write_file(".gemignore", "^test/\n")?;
  project.commit("Initial gem")?;

  let output = project.run(&["files"])?;
  let out = stdout(&output);
  assert!(out.contains("lib/mygem.rb"));
  assert!(!out.contains("test/tc_mygem.rb"));

  Ok(())
}

#[test]
fn test_directory_option() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "module Mygem; end\n")?;
  project.commit("Initial gem")?;

  let elsewhere = tempfile::TempDir::new()?;
  let path = project.path.to_string_lossy().into_owned();
  let output = run_gemsmith(elsewhere.path(), &["-C", &path, "files"], None)?;
  assert!(output.status.success());
  assert!(stdout(&output).contains("lib/mygem.rb"));

  Ok(())
}

#[test]
fn test_directory_option_pointing_into_subdirectory() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "module Mygem; end\n")?;
  project.write_file("test/tc_mygem.rb", "require 'mygem'\n")?;
  project.commit("Initial gem")?;

  let elsewhere = tempfile::TempDir::new()?;
  let lib = project.path.join("lib").to_string_lossy().into_owned();
  let output = run_gemsmith(elsewhere.path(), &["-C", &lib, "files"], None)?;
  assert!(output.status.success());
  let lines: Vec<String> = stdout(&output).lines().map(|l| l.split_whitespace().collect::<Vec<_>>().join(" ")).collect();
  assert!(lines.contains(&"runtime lib/mygem.rb".to_string()));
  assert!(lines.contains(&"development test/tc_mygem.rb".to_string()));

  Ok(())
}

#[test]
fn test_uncommitted_changes_reported_once() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "module Mygem; end\n")?;
  project.commit("Initial gem")?;

  let clean = project.run(&["files"])?;
  assert!(!stderr(&clean).contains("Uncommitted changes"));

  project.write_file("scratch.txt", "notes\n")?;
  let dirty = project.run(&["files"])?;
  let err = stderr(&dirty);
  assert_eq!(err.matches("Uncommitted changes").count(), 1);
  assert!(err.contains("?? scratch.txt"));
  assert!(!stdout(&dirty).contains("scratch.txt"));

  Ok(())
}
