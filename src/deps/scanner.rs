//! Statement scanning: `require` lines and shell command invocations
//!
//! Each reference kind has its own matcher so precedence and capture rules
//! stay independently testable. The scanner tries the import matcher first
//! and only falls back to the command matcher when it fails.

use crate::core::error::SmithResult;
use crate::deps::model::{Diagnostic, Reference, ReferenceKind, SourceFile};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// One syntactic shape worth extracting from a line
pub trait LineMatcher {
  /// Kind of reference this matcher produces
  fn kind(&self) -> ReferenceKind;

  /// The referenced name, if the line has this shape
  fn capture<'l>(&self, line: &'l str) -> Option<&'l str>;
}

/// `require 'name'` / `require "name"`
pub struct ImportMatcher {
  pattern: Regex,
}

impl ImportMatcher {
  pub fn new() -> SmithResult<Self> {
    Ok(Self {
      pattern: Regex::new(r#"^\s*require\s+['"]([^'"]+)['"]"#)?,
    })
  }
}

impl LineMatcher for ImportMatcher {
  fn kind(&self) -> ReferenceKind {
    ReferenceKind::Import
  }

  fn capture<'l>(&self, line: &'l str) -> Option<&'l str> {
    self.pattern.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
  }
}

/// `system(...)` calls, backtick commands, and commented backtick commands
pub struct CommandMatcher {
  invocation: Regex,
  commented: Regex,
}

impl CommandMatcher {
  pub fn new() -> SmithResult<Self> {
    Ok(Self {
      // Lazy prefix: the first marker on the line wins
      invocation: Regex::new(r"^[^#`]*?(?:\bsystem\b\W*|`\W*)([\w\-]+)")?,
      commented: Regex::new(r"^\s*#\s*`\W*([\w\-]+)")?,
    })
  }
}

impl LineMatcher for CommandMatcher {
  fn kind(&self) -> ReferenceKind {
    ReferenceKind::Command
  }

  fn capture<'l>(&self, line: &'l str) -> Option<&'l str> {
    self
      .invocation
      .captures(line)
      .or_else(|| self.commented.captures(line))
      .and_then(|c| c.get(1))
      .map(|m| m.as_str())
  }
}

/// Two-stage line classifier
pub struct StatementScanner {
  import: ImportMatcher,
  command: CommandMatcher,
}

impl StatementScanner {
  pub fn new() -> SmithResult<Self> {
    Ok(Self {
      import: ImportMatcher::new()?,
      command: CommandMatcher::new()?,
    })
  }

  /// Classify a single line: import first, then command
  pub fn match_line(&self, line: &str) -> Option<(ReferenceKind, String)> {
    let matchers: [&dyn LineMatcher; 2] = [&self.import, &self.command];
    matchers
      .iter()
      .find_map(|m| m.capture(line).map(|name| (m.kind(), name.to_string())))
  }

  /// Lazily scan one file relative to `root`
  ///
  /// A read error yields one `Err` diagnostic and ends the file; references
  /// already produced stand.
  pub fn scan<'a>(&'a self, root: &Path, file: &'a SourceFile) -> FileReferences<'a> {
    let full_path = root.join(&file.path);
    let state = match File::open(&full_path) {
      Ok(handle) => ReadState::Reading(BufReader::new(handle).lines()),
      Err(e) => ReadState::Failed(Diagnostic::for_path(&file.path, e.to_string())),
    };
    FileReferences {
      scanner: self,
      file,
      state,
      line_no: 0,
    }
  }
}

enum ReadState {
  Reading(Lines<BufReader<File>>),
  Failed(Diagnostic),
  Done,
}

/// Iterator over the references in one file
pub struct FileReferences<'a> {
  scanner: &'a StatementScanner,
  file: &'a SourceFile,
  state: ReadState,
  line_no: usize,
}

impl Iterator for FileReferences<'_> {
  type Item = Result<Reference, Diagnostic>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      match std::mem::replace(&mut self.state, ReadState::Done) {
        ReadState::Done => return None,
        ReadState::Failed(diagnostic) => return Some(Err(diagnostic)),
        ReadState::Reading(mut lines) => match lines.next() {
          None => return None,
          Some(Err(e)) => {
            let message = format!("line {}: {}", self.line_no + 1, e);
            return Some(Err(Diagnostic::for_path(&self.file.path, message)));
          }
          Some(Ok(line)) => {
            self.line_no += 1;
            self.state = ReadState::Reading(lines);
            if let Some((kind, name)) = self.scanner.match_line(&line) {
              return Some(Ok(Reference {
                kind,
                name,
                path: self.file.path.clone(),
                role: self.file.role,
                line: self.line_no,
              }));
            }
          }
        },
      }
    }
  }
}
