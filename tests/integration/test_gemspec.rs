//! Tests for the `gemspec` command

use crate::helpers::*;
use anyhow::Result;

fn full_project() -> Result<GemProject> {
  let project = GemProject::new("mygem-0.3")?;
  project.write_file("lib/mygem.rb", "require 'alpha'\nrequire 'json'\nrequire 'mygem/version'\n")?;
  project.write_file("lib/mygem/version.rb", "module Mygem\n  VERSION = '0.3.1'\nend\n")?;
  project.write_executable("bin/mygem", "#!/usr/bin/env ruby\nrequire 'mygem'\nsystem('foo --run')\n")?;
  project.write_file("test/tc_mygem.rb", "require 'minitest'\nrequire 'alpha'\n")?;
  project.commit("Initial gem")?;
  Ok(project)
}

#[test]
fn test_gemspec_written() -> Result<()> {
  let project = full_project()?;

  let output = project.run(&["gemspec"])?;
  assert!(stdout(&output).contains("mygem.gemspec"));
  assert!(project.file_exists("mygem.gemspec"));

  let spec = project.read_file("mygem.gemspec")?;
  assert!(spec.starts_with("Gem::Specification.new do |s|\n"));
  assert!(spec.contains("  s.name     = 'mygem'\n"));
  assert!(spec.contains("  s.version  = '0.3.1'\n"));
  assert!(spec.contains("  s.author   = 'Test User'\n"));
  assert!(spec.contains("  s.email    = 'test@example.com'\n"));
  assert!(spec.contains("  s.licenses = ['MIT']\n"));
  assert!(spec.contains("<<DESCRIPTION\nMygem keeps things tidy.\n\nIt does so quietly.\nDESCRIPTION\n"));
  assert!(spec.contains("<<SUMMARY\nMygem keeps things tidy.\nSUMMARY\n"));
  assert!(spec.contains("\nlib/mygem/version.rb\n"));
  assert!(spec.contains("  s.executables << 'mygem'\n"));
  assert!(spec.contains("  s.add_runtime_dependency 'alpha', '~> 2.3', '>= 2.3.1'\n"));
  assert!(spec.contains("  s.add_development_dependency 'minitest', '~> 5.20', '>= 5.20.0'\n"));
  assert!(spec.contains("  s.requirements << 'foo: 9.9'\n"));
  assert!(!spec.contains("'json'"));
  assert_eq!(spec.matches("'alpha'").count(), 1);
  assert!(spec.ends_with("end\n"));

  // The freshly written gemspec is untracked
  assert!(stderr(&output).contains("?? mygem.gemspec"));

  Ok(())
}

#[test]
fn test_gemspec_stdout_writes_nothing() -> Result<()> {
  let project = full_project()?;

  let output = project.run(&["gemspec", "--stdout"])?;
  assert!(stdout(&output).contains("s.add_runtime_dependency 'alpha'"));
  assert!(!project.file_exists("mygem.gemspec"));

  Ok(())
}

#[test]
fn test_config_overrides_descriptor_fields() -> Result<()> {
  let project = full_project()?;
  project.write_config(
    "[package]\nname = \"mygem\"\nlicense = \"Apache-2.0\"\nhomepage = \"https://mygem.example.com\"\n",
  )?;
  project.commit("Configure")?;

  let output = project.run(&["gemspec", "--stdout"])?;
  let spec = stdout(&output);
  assert!(spec.contains("  s.licenses = ['Apache-2.0']\n"));
  assert!(spec.contains("  s.homepage = 'https://mygem.example.com'\n"));

  Ok(())
}

#[test]
fn test_gemspec_without_version_is_data_error() -> Result<()> {
  let project = GemProject::new("mygem")?;
  project.write_file("lib/mygem.rb", "module Mygem; end\n")?;
  project.commit("Initial gem")?;

  let output = project.run_unchecked(&["gemspec"])?;
  assert_eq!(output.status.code(), Some(65));
  assert!(stderr(&output).contains("version"));
  assert!(!project.file_exists("mygem.gemspec"));

  Ok(())
}
