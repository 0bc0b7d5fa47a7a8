//! Modgen Core - Shared library for module generation CLIs
//!
//! This library renders a fixed set of source templates for a module (types, seed
//! data, CRUD service, route handlers, documentation) into a project that follows a
//! file-system routing convention, and records each generation in a JSON manifest
//! and an append-only log.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure functions for naming, path parsing, template
//!   rendering and the in-memory record store
//! - **Layer 2: Workflow Orchestration** - `FrameworkConfig` trait and `Generator`,
//!   which plans, writes all-or-nothing, then updates the manifest and log
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based summary output
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use modgen_core::{Generator, ProjectLayout};
//!
//! let generator = Generator::new(".", ProjectLayout::default(), "0.1.0");
//! let outcome = generator.create_server("bands/linkinpark/song").await?;
//! assert_eq!(outcome.entry.route, "/api/bands/linkinpark/songs");
//! ```

pub mod activity_log;
pub mod config;
pub mod framework;
pub mod generate;
pub mod manifest;
pub mod naming;
pub mod report;
pub mod store;
pub mod templates;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::ProjectLayout;
pub use framework::FrameworkConfig;
pub use generate::{GenerateError, GenerateRequest, GenerationOutcome, Generator};
pub use manifest::{LoadedManifest, Manifest, ModuleEntry, ModuleKind};
pub use naming::{pluralize, to_kebab, to_pascal, ModulePath};
pub use store::{Filters, ModuleStore, Record};

#[cfg(feature = "tui")]
pub use tui::run;

#[cfg(not(feature = "tui"))]
pub use report::run;
