pub mod cost_model;
pub mod engine;
pub mod geo;
pub mod matcher;
pub mod optimizer;
pub mod pipeline;
pub mod profitability;
pub mod reallocator;

pub use crate::domain::model::{OptimizationOutcome, ReplacementMapping, Route};
pub use crate::domain::ports::{ConfigProvider, CoordinateLookup, Pipeline, Reporter, Storage};
pub use crate::utils::error::Result;
