//! Project configuration
//!
//! Projects may carry an optional YAML file (see [`FrameworkConfig::config_file`])
//! that relocates the directories and bookkeeping files the generator writes to.
//!
//! [`FrameworkConfig::config_file`]: crate::framework::FrameworkConfig::config_file

pub mod layout;

pub use layout::ProjectLayout;
