//! Module manifest (`module.json`) types, loading and merging

use crate::naming::ModulePath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which generator produced a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// UI-facing module with a page route
    Frontend,
    /// API-facing module with JSON route handlers
    Backend,
}

impl ModuleKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleKind::Frontend => "frontend",
            ModuleKind::Backend => "backend",
        }
    }

    /// How a repeated generation of the same module is recorded
    pub fn merge_policy(&self) -> MergePolicy {
        match self {
            ModuleKind::Frontend => MergePolicy::Replace,
            ModuleKind::Backend => MergePolicy::SkipExisting,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single recorded module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Module name (kebab name for frontend modules, folder path for backend modules)
    pub name: String,

    pub kind: ModuleKind,

    /// Public route the module is served under
    pub route: String,
}

/// Entries as they may appear on disk, including the two legacy shapes
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    /// Bare module path written by older backend generations
    Path(String),
    Entry {
        name: String,
        #[serde(default)]
        kind: Option<ModuleKind>,
        #[serde(default)]
        route: Option<String>,
    },
}

impl StoredEntry {
    fn into_entry(self) -> ModuleEntry {
        match self {
            StoredEntry::Path(path) => {
                let route = ModulePath::parse(&path)
                    .map(|p| format!("/api/{}", p.route_path()))
                    .unwrap_or_default();
                ModuleEntry {
                    name: path,
                    kind: ModuleKind::Backend,
                    route,
                }
            }
            StoredEntry::Entry { name, kind, route } => {
                let route = route.unwrap_or_else(|| format!("/{}", name));
                ModuleEntry {
                    name,
                    kind: kind.unwrap_or(ModuleKind::Frontend),
                    route,
                }
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredManifest {
    #[serde(default)]
    generator_version: Option<String>,
    #[serde(default)]
    modules: Vec<StoredEntry>,
}

/// The manifest of every module generated in a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Version of the generator that last wrote the manifest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_version: Option<String>,

    pub modules: Vec<ModuleEntry>,
}

/// How [`Manifest::record`] treats an entry whose kind and name are already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Remove the existing entry and append the new one
    Replace,
    /// Keep the existing entry and drop the new one
    SkipExisting,
}

/// What [`Manifest::record`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Added,
    Replaced,
    Skipped,
}

/// Result of looking for a manifest on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedManifest {
    /// No manifest file exists yet
    Missing,
    Present(Manifest),
}

impl LoadedManifest {
    pub fn into_manifest(self) -> Manifest {
        match self {
            LoadedManifest::Missing => Manifest::default(),
            LoadedManifest::Present(manifest) => manifest,
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest {} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to access manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Manifest {
    /// Read a manifest, distinguishing a missing file from a corrupt one
    pub async fn load(path: &Path) -> Result<LoadedManifest, ManifestError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LoadedManifest::Missing)
            }
            Err(source) => {
                return Err(ManifestError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&content)
            .map(LoadedManifest::Present)
            .map_err(|source| ManifestError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse manifest JSON, upgrading legacy entry shapes
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let stored: StoredManifest = serde_json::from_str(content)?;
        Ok(Self {
            generator_version: stored.generator_version,
            modules: stored
                .modules
                .into_iter()
                .map(StoredEntry::into_entry)
                .collect(),
        })
    }

    /// Record an entry according to its kind's merge policy
    pub fn record(&mut self, entry: ModuleEntry) -> MergeOutcome {
        let existing = self
            .modules
            .iter()
            .position(|m| m.kind == entry.kind && m.name == entry.name);

        match (existing, entry.kind.merge_policy()) {
            (None, _) => {
                self.modules.push(entry);
                MergeOutcome::Added
            }
            (Some(_), MergePolicy::SkipExisting) => MergeOutcome::Skipped,
            (Some(_), MergePolicy::Replace) => {
                self.modules
                    .retain(|m| !(m.kind == entry.kind && m.name == entry.name));
                self.modules.push(entry);
                MergeOutcome::Replaced
            }
        }
    }

    /// Write the whole manifest back, pretty-printed
    pub async fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;
        json.push('\n');

        tokio::fs::write(path, json)
            .await
            .map_err(|source| ManifestError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}
