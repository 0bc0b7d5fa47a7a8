//! Slash-delimited module path parsing

use super::{pluralize, to_pascal};
use std::fmt;

/// A parsed module path such as `bands/linkinpark/song`
///
/// Segments are trimmed and empty ones are discarded during parsing, so stray
/// whitespace and doubled, leading or trailing slashes collapse away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    /// Parse a slash-delimited path. Returns `None` when no segment survives.
    pub fn parse(input: &str) -> Option<Self> {
        let segments: Vec<String> = input
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The singular domain-object name (last segment)
    pub fn leaf(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// On-disk module directory, relative to the modules root
    pub fn folder_path(&self) -> String {
        self.segments.join("/")
    }

    /// The leaf pluralized for use as a route segment
    pub fn plural_segment(&self) -> String {
        pluralize(self.leaf())
    }

    /// Parent segments followed by the pluralized leaf
    pub fn route_path(&self) -> String {
        let mut parts: Vec<String> = self.parents().to_vec();
        parts.push(self.plural_segment());
        parts.join("/")
    }

    /// PascalCase type name derived from the leaf
    pub fn type_name(&self) -> String {
        to_pascal(self.leaf())
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder_path())
    }
}

/// Build an import specifier that reaches `target` from a file living in `from_dir`.
///
/// Both arguments are project-relative, slash-delimited paths.
pub fn relative_import(from_dir: &str, target: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from.len() - common;
    let rest = to[common..].join("/");

    if ups == 0 {
        format!("./{}", rest)
    } else {
        format!("{}{}", "../".repeat(ups), rest)
    }
}
