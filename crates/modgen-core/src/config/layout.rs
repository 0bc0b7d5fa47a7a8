//! Directory layout of a generated project

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where generated files and bookkeeping files live, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    /// Root of the generated module directories
    pub modules_dir: String,

    /// Root of page routes
    pub routes_dir: String,

    /// Root of API routes
    pub api_dir: String,

    /// Shared HTTP response helper, created once per project
    pub response_helper: String,

    /// JSON manifest of generated modules
    pub manifest_file: String,

    /// Append-only generation log
    pub log_file: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            modules_dir: "lib/modules".to_string(),
            routes_dir: "routes".to_string(),
            api_dir: "routes/api".to_string(),
            response_helper: "lib/response.ts".to_string(),
            manifest_file: "module.json".to_string(),
            log_file: "module.log".to_string(),
        }
    }
}

impl ProjectLayout {
    /// Load the layout from `<project_root>/<file_name>`, falling back to defaults
    /// when the file does not exist
    pub fn load(project_root: &Path, file_name: &str) -> Result<Self> {
        let path = project_root.join(file_name);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        // An empty file is a valid "use defaults" config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let layout: ProjectLayout = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(layout.normalized())
    }

    /// Strip stray leading/trailing slashes so paths join predictably
    fn normalized(self) -> Self {
        let trim = |s: String| s.trim().trim_matches('/').to_string();
        Self {
            modules_dir: trim(self.modules_dir),
            routes_dir: trim(self.routes_dir),
            api_dir: trim(self.api_dir),
            response_helper: trim(self.response_helper),
            manifest_file: trim(self.manifest_file),
            log_file: trim(self.log_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::load(tmp.path(), "modgen.yaml").unwrap();
        assert_eq!(layout, ProjectLayout::default());
    }

    #[test]
    fn test_partial_override() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("modgen.yaml"),
            "modules_dir: /src/modules/\nlog_file: generated.log\n",
        )
        .unwrap();

        let layout = ProjectLayout::load(tmp.path(), "modgen.yaml").unwrap();
        assert_eq!(layout.modules_dir, "src/modules");
        assert_eq!(layout.log_file, "generated.log");
        assert_eq!(layout.api_dir, "routes/api");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("modgen.yaml"), "modules_dir: [unclosed").unwrap();

        let err = ProjectLayout::load(tmp.path(), "modgen.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
