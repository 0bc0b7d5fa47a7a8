//! Module generation
//!
//! Generation happens in two phases:
//! - **Plan**: every file body is rendered up front into a [`GenerationPlan`]
//!   (see [`frontend::plan`] and [`backend::plan`])
//! - **Commit**: the [`writer`] checks every target, then writes all files or none
//!
//! [`Generator`] ties the phases to the manifest and activity log.

pub mod backend;
pub mod frontend;
pub mod writer;

use crate::activity_log::ActivityLog;
use crate::config::ProjectLayout;
use crate::framework::FrameworkConfig;
use crate::manifest::{Manifest, ManifestError, MergeOutcome, ModuleEntry, ModuleKind};
use crate::version;
use anyhow::Context;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How a planned file treats an existing file at its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// The target must not exist
    Create,
    /// Skip the file when the target already exists
    CreateIfAbsent,
}

/// A rendered file waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to the project root
    pub path: PathBuf,
    pub contents: String,
    pub mode: WriteMode,
}

impl PlannedFile {
    pub fn create(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
            mode: WriteMode::Create,
        }
    }

    pub fn create_if_absent(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
            mode: WriteMode::CreateIfAbsent,
        }
    }
}

/// Everything one generation will write, rendered before touching disk
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    /// Module directory relative to the project root; must not exist yet
    pub module_dir: PathBuf,

    /// PascalCase type name used in the generated sources
    pub type_name: String,

    pub files: Vec<PlannedFile>,

    /// Manifest entry recorded after a successful write
    pub entry: ModuleEntry,
}

impl GenerationPlan {
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&PlannedFile> {
        self.files.iter().find(|f| f.path == path.as_ref())
    }
}

/// Result of a successful generation
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub project_root: PathBuf,
    pub entry: ModuleEntry,
    pub type_name: String,
    pub module_dir: PathBuf,
    /// Files written, relative to the project root
    pub written: Vec<PathBuf>,
    /// Shared files left alone because they already existed
    pub skipped: Vec<PathBuf>,
    pub manifest: MergeOutcome,
    pub warnings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid {what}: '{input}'")]
    InvalidName { what: &'static str, input: String },

    #[error("Module directory already exists: {}", .0.display())]
    ModuleExists(PathBuf),

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    PathOccupied(PathBuf),

    #[error("Failed to write {} (all files from this run were removed): {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Module files were written but the manifest was not updated: {0}")]
    ManifestSave(#[source] ManifestError),

    #[error("Failed to append to log {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Conflicts are reported before anything was written
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            GenerateError::ModuleExists(_) | GenerateError::PathOccupied(_)
        )
    }

    /// Bookkeeping failures happen after the module files are on disk
    pub fn wrote_files(&self) -> bool {
        matches!(
            self,
            GenerateError::ManifestSave(_) | GenerateError::Log { .. }
        )
    }
}

/// A generation requested from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateRequest {
    /// `create <name> [--route <path>]`
    Frontend { name: String, route: Option<String> },
    /// `create-server <path>`
    Backend { path: String },
}

impl GenerateRequest {
    pub fn kind(&self) -> ModuleKind {
        match self {
            GenerateRequest::Frontend { .. } => ModuleKind::Frontend,
            GenerateRequest::Backend { .. } => ModuleKind::Backend,
        }
    }

    /// The raw name or path the user asked for
    pub fn target(&self) -> &str {
        match self {
            GenerateRequest::Frontend { name, .. } => name,
            GenerateRequest::Backend { path } => path,
        }
    }
}

/// Runs plans against a project directory
#[derive(Debug, Clone)]
pub struct Generator {
    root: PathBuf,
    layout: ProjectLayout,
    cli_version: String,
    upgrade_command: String,
}

impl Generator {
    pub fn new(root: impl Into<PathBuf>, layout: ProjectLayout, cli_version: &str) -> Self {
        Self {
            root: root.into(),
            layout,
            cli_version: cli_version.to_string(),
            upgrade_command: String::new(),
        }
    }

    /// Build a generator for `root`, reading the framework's layout file if present
    pub fn from_config<C: FrameworkConfig>(
        config: &C,
        root: impl Into<PathBuf>,
        cli_version: &str,
    ) -> anyhow::Result<Self> {
        let root = root.into();
        let layout = ProjectLayout::load(&root, config.config_file())
            .with_context(|| format!("Failed to load {} project layout", config.display_name()))?;

        let mut generator = Self::new(root, layout, cli_version);
        generator.upgrade_command = config.upgrade_command().to_string();
        Ok(generator)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.layout.manifest_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(&self.layout.log_file)
    }

    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerationOutcome, GenerateError> {
        match request {
            GenerateRequest::Frontend { name, route } => {
                self.create_frontend(name, route.as_deref()).await
            }
            GenerateRequest::Backend { path } => self.create_server(path).await,
        }
    }

    /// Generate a UI-facing module
    pub async fn create_frontend(
        &self,
        name: &str,
        route: Option<&str>,
    ) -> Result<GenerationOutcome, GenerateError> {
        let plan = frontend::plan(&self.layout, name, route)?;
        self.run(plan).await
    }

    /// Generate an API-facing module from a slash-delimited path
    pub async fn create_server(&self, path: &str) -> Result<GenerationOutcome, GenerateError> {
        let plan = backend::plan(&self.layout, path)?;
        self.run(plan).await
    }

    async fn run(&self, plan: GenerationPlan) -> Result<GenerationOutcome, GenerateError> {
        // A corrupt manifest aborts before any file is written
        let mut manifest = Manifest::load(&self.manifest_path()).await?.into_manifest();

        let mut warnings = Vec::new();
        if let Some(warning) = version::check_compatibility(
            &self.cli_version,
            manifest.generator_version.as_deref(),
            &self.upgrade_command,
        ) {
            warnings.push(warning);
        }

        let report = writer::commit(&self.root, &plan).await?;

        manifest.generator_version = Some(self.cli_version.clone());
        let merge = manifest.record(plan.entry.clone());
        manifest
            .save(&self.manifest_path())
            .await
            .map_err(GenerateError::ManifestSave)?;
        tracing::debug!(outcome = ?merge, name = %plan.entry.name, "manifest updated");

        let log = ActivityLog::new(self.log_path());
        let message = format!(
            "Generated {} module '{}' at {} ({} files)",
            plan.entry.kind,
            plan.entry.name,
            plan.entry.route,
            report.written.len()
        );
        log.append(&message).await.map_err(|source| GenerateError::Log {
            path: log.path().to_path_buf(),
            source,
        })?;

        Ok(GenerationOutcome {
            project_root: self.root.clone(),
            entry: plan.entry,
            type_name: plan.type_name,
            module_dir: plan.module_dir,
            written: report.written,
            skipped: report.skipped,
            manifest: merge,
            warnings,
        })
    }

    /// Modules recorded in the project's manifest
    pub async fn recorded_modules(&self) -> Result<Vec<ModuleEntry>, GenerateError> {
        Ok(Manifest::load(&self.manifest_path())
            .await?
            .into_manifest()
            .modules)
    }
}

/// Public URL for a directory under the routes root, e.g. `routes/api/songs` -> `/api/songs`
pub(crate) fn public_route(layout: &ProjectLayout, dir: &str) -> String {
    let relative = match dir.strip_prefix(layout.routes_dir.as_str()) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => dir,
    };
    format!("/{}", relative)
}

/// Join slash-delimited project-relative path pieces, skipping empty ones
pub(crate) fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Kind-agnostic label used in console output
pub fn kind_label(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::Frontend => "page module",
        ModuleKind::Backend => "API module",
    }
}
