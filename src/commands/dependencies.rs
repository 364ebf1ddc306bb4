//! `gemsmith dependencies`

use crate::core::context::ProjectContext;
use crate::core::error::SmithResult;
use crate::deps::aggregate::Bucket;
use crate::deps::model::VersionKey;
use crate::deps::resolve::VersionCache;
use crate::deps::{self, ScanReport};

/// Scan the project and print the six dependency buckets
pub fn run_dependencies(ctx: &ProjectContext, json: bool) -> SmithResult<()> {
  let report = ctx.with_collaborators(|collaborators| deps::scan(&ctx.scan_settings(), collaborators))?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print!("{}", render_buckets(&report)?);
  }
  Ok(())
}

enum Listing {
  Gem,
  Library,
  Command,
}

impl Listing {
  fn render(&self, bucket: &Bucket, versions: &VersionCache) -> String {
    let key = match self {
      Listing::Gem => VersionKey::Gem,
      Listing::Command => VersionKey::Command,
      Listing::Library if bucket.is_empty() => return String::new(),
      Listing::Library => return format!("{}\n", bucket.iter().collect::<Vec<_>>().join(", ")),
    };
    bucket
      .iter()
      .map(|name| {
        let version = versions.version(&key(name.to_string())).unwrap_or_default();
        format!("{}: {}\n", name, version)
      })
      .collect()
  }
}

/// Plain-text listing: versioned lines for gems and commands, one joined
/// line for built-in libraries
pub fn render_buckets(report: &ScanReport) -> SmithResult<String> {
  let mut versions = VersionCache::new();
  for record in &report.versions {
    versions.record(record.clone())?;
  }

  let buckets = &report.buckets;
  let sections = [
    ("# runtime gems", &buckets.gems.runtime, Listing::Gem),
    ("# development gems", &buckets.gems.development, Listing::Gem),
    ("# runtime libraries", &buckets.libraries.runtime, Listing::Library),
    ("# development libraries", &buckets.libraries.development, Listing::Library),
    ("# runtime requirements", &buckets.commands.runtime, Listing::Command),
    ("# development requirements", &buckets.commands.development, Listing::Command),
  ];

  let mut out = String::new();
  for (header, bucket, listing) in sections {
    out.push_str(header);
    out.push('\n');
    out.push_str(&listing.render(bucket, &versions));
  }
  Ok(out)
}
