//! Classification of resolved references into runtime/development buckets

use crate::deps::model::Role;
use crate::deps::resolve::{CommandResolution, LibraryResolution};
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bucket(Vec<String>);

impl Bucket {
  /// Add a name unless already present; returns whether it was added
  pub fn insert(&mut self, name: &str) -> bool {
    if self.contains(name) {
      return false;
    }
    self.0.push(name.to_string());
    true
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.iter().any(|n| n == name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Runtime and development variants of one kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBuckets {
  pub runtime: Bucket,
  pub development: Bucket,
}

impl RoleBuckets {
  pub fn for_role(&self, role: Role) -> &Bucket {
    match role {
      Role::Distributed => &self.runtime,
      Role::Auxiliary => &self.development,
    }
  }

  fn for_role_mut(&mut self, role: Role) -> &mut Bucket {
    match role {
      Role::Distributed => &mut self.runtime,
      Role::Auxiliary => &mut self.development,
    }
  }

  /// Development names that are not also runtime names
  pub fn development_only(&self) -> impl Iterator<Item = &str> {
    self.development.iter().filter(|name| !self.runtime.contains(name))
  }
}

/// The six dependency buckets of a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buckets {
  /// Installed gems
  pub gems: RoleBuckets,
  /// Standard/built-in libraries (tracked, never declared)
  pub libraries: RoleBuckets,
  /// External commands
  pub commands: RoleBuckets,
}

impl Buckets {
  pub fn add_library(&mut self, role: Role, resolution: &LibraryResolution) {
    match resolution {
      LibraryResolution::Gem { name, .. } => self.gems.for_role_mut(role).insert(name),
      LibraryResolution::Builtin { name } => self.libraries.for_role_mut(role).insert(name),
    };
  }

  pub fn add_command(&mut self, role: Role, resolution: &CommandResolution) {
    self.commands.for_role_mut(role).insert(&resolution.label);
  }
}
