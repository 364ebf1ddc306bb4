//! Declaration lines for the gemspec

use crate::deps::aggregate::Buckets;
use crate::deps::model::VersionKey;
use crate::deps::resolve::VersionCache;
use serde::Serialize;
use std::fmt;

/// One line of the dependency block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Declaration {
  RuntimeDependency {
    name: String,
    compatible: String,
    minimum: String,
  },
  DevelopmentDependency {
    name: String,
    compatible: String,
    minimum: String,
  },
  Requirement {
    name: String,
    version: Option<String>,
    development: bool,
  },
}

impl fmt::Display for Declaration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Declaration::RuntimeDependency {
        name,
        compatible,
        minimum,
      } => write!(
        f,
        "s.add_runtime_dependency '{}', '~> {}', '>= {}'",
        name, compatible, minimum
      ),
      Declaration::DevelopmentDependency {
        name,
        compatible,
        minimum,
      } => write!(
        f,
        "s.add_development_dependency '{}', '~> {}', '>= {}'",
        name, compatible, minimum
      ),
      Declaration::Requirement {
        name,
        version,
        development,
      } => {
        let scope = if *development { " in development" } else { "" };
        write!(
          f,
          "s.requirements << '{}{}: {}'",
          name,
          scope,
          version.as_deref().unwrap_or_default()
        )
      }
    }
  }
}

/// Compatible-release bound: the first two dot-separated components
pub fn compatible_release(version: &str) -> String {
  version.split('.').take(2).collect::<Vec<_>>().join(".")
}

/// Turn buckets and resolved versions into ordered declarations
///
/// Gems come first (runtime, then development-only), then command
/// requirements in the same order. Library buckets produce nothing.
pub fn synthesize(buckets: &Buckets, versions: &VersionCache) -> Vec<Declaration> {
  let mut declarations = Vec::new();

  for name in buckets.gems.runtime.iter() {
    let minimum = gem_version(versions, name);
    declarations.push(Declaration::RuntimeDependency {
      name: name.to_string(),
      compatible: compatible_release(&minimum),
      minimum,
    });
  }
  for name in buckets.gems.development_only() {
    let minimum = gem_version(versions, name);
    declarations.push(Declaration::DevelopmentDependency {
      name: name.to_string(),
      compatible: compatible_release(&minimum),
      minimum,
    });
  }

  let requirement = |name: &str, development: bool| Declaration::Requirement {
    name: name.to_string(),
    version: versions
      .version(&VersionKey::Command(name.to_string()))
      .map(str::to_string),
    development,
  };
  declarations.extend(buckets.commands.runtime.iter().map(|name| requirement(name, false)));
  declarations.extend(buckets.commands.development_only().map(|name| requirement(name, true)));

  declarations
}

// Gems only enter a bucket after the resolver recorded their version
fn gem_version(versions: &VersionCache, name: &str) -> String {
  versions
    .version(&VersionKey::Gem(name.to_string()))
    .unwrap_or_default()
    .to_string()
}
