#[cfg(feature = "cli")]
pub mod cli;
pub mod model;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use model::{CoordinateSource, ModelConfig, ReallocationPolicy};

/// Replacement report formats the load phase can emit.
pub const REPORT_FORMATS: &[&str] = &["json", "csv"];
