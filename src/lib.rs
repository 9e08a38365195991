pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::coordinates::CoordinateTable;
pub use adapters::storage::LocalStorage;
pub use config::{ModelConfig, ReallocationPolicy};
pub use core::{engine::OptimizerEngine, optimizer::RouteOptimizer, pipeline::FlightPipeline};
pub use domain::model::{Coordinate, OptimizationOutcome, ReplacementMapping, Route};
pub use utils::error::{OptimizerError, Result};
