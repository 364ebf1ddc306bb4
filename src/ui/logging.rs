//! Structured logging setup
//!
//! All log output goes to stderr so stdout stays clean for command output
//! (`gemsmith gemspec --stdout`, `dependencies --json`). `GEMSMITH_LOG`
//! takes any `EnvFilter` directive and wins over `-v`.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "GEMSMITH_LOG";

static INIT: Once = Once::new();

/// Map the `-v` count to a level
pub fn level_for(verbosity: u8) -> Level {
  match verbosity {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  }
}

fn filter_for(verbosity: u8) -> EnvFilter {
  let fallback = || EnvFilter::new(level_for(verbosity).as_str().to_lowercase());
  match env::var(LOG_ENV) {
    Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(&directive).unwrap_or_else(|e| {
      eprintln!("Invalid {} '{}': {}; falling back to -v", LOG_ENV, directive, e);
      fallback()
    }),
    _ => fallback(),
  }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: u8) {
  INIT.call_once(|| {
    tracing_subscriber::registry()
      .with(filter_for(verbosity))
      .with(
        fmt::layer()
          .with_writer(std::io::stderr)
          .with_target(verbosity >= 2)
          .without_time(),
      )
      .init();
  });
}
