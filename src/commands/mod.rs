//! CLI commands for gemsmith
//!
//! - **files**: list the source files a dependency scan reads
//! - **dependencies**: print the discovered dependency buckets
//! - **gemspec**: write (or print) `<name>.gemspec`
//! - **info**: print project attributes, optionally failing on missing ones
//!
//! All commands accept `&ProjectContext` so git and config are loaded once.

pub mod dependencies;
pub mod files;
pub mod gemspec;
pub mod info;

pub use dependencies::run_dependencies;
pub use files::run_files;
pub use gemspec::run_gemspec;
pub use info::run_info;
