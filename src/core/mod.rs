//! Core building blocks shared by every gemsmith command
//!
//! - **config**: gemsmith.toml parsing and validation
//! - **context**: project context built once in main, with the end-of-run hook
//! - **error**: error types with contextual help messages and exit codes
//! - **process**: the system process runner
//! - **vcs**: git queries (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod process;
pub mod vcs;
