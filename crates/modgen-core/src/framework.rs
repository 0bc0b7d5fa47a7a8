//! Framework configuration trait for CLI binaries
//!
//! This trait defines the interface a binary implements to describe the web
//! framework whose conventions the generated modules follow.

use crate::generate::GenerationOutcome;

/// Configuration trait for the target framework
///
/// Implementations define:
/// - Framework identity (name, display name)
/// - Where project configuration is read from
/// - Documentation links
/// - Post-generation instructions
pub trait FrameworkConfig: Clone + Send + Sync + 'static {
    /// Internal framework name
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Optional per-project layout file, relative to the project root
    fn config_file(&self) -> &'static str {
        "modgen.yaml"
    }

    /// URL for framework routing documentation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after a module is generated
    fn next_steps(&self, outcome: &GenerationOutcome) -> Vec<String>;
}
