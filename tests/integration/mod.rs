//! Integration tests for gemsmith
//!
//! Each test builds a throwaway gem project under git and runs the compiled
//! binary against it, with fake `gem` and `which` programs wired in through
//! gemsmith.toml.

mod helpers;
mod test_dependencies;
mod test_files;
mod test_gemspec;
mod test_info;
