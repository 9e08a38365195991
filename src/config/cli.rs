use crate::config::model::{CoordinateSource, ModelConfig, DEFAULT_CONCURRENT_REQUESTS};
use crate::config::REPORT_FORMATS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_allowed_values, validate_path, Validate};
use clap::Parser;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Parser)]
#[command(name = "flight-optimizer")]
#[command(about = "Prune unprofitable flight paths and re-route their passengers")]
pub struct CliConfig {
    /// Route list, typically produced by sorting flights by distance
    #[arg(default_value = "sorted_flights_new.txt")]
    pub routes_file: String,

    #[arg(long, default_value = "airports.csv")]
    pub coordinates_file: String,

    /// Resolve coordinates from an HTTP service instead of the CSV table
    #[arg(long)]
    pub coordinates_endpoint: Option<String>,

    #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value = "profitable_flights.txt")]
    pub output_file: String,

    #[arg(long, value_delimiter = ',')]
    pub report_formats: Vec<String>,

    #[arg(long, help = "Bundle all outputs into a single zip archive")]
    pub archive: bool,

    #[command(flatten)]
    pub model: ModelConfig,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn routes_file(&self) -> &str {
        &self.routes_file
    }

    fn coordinate_source(&self) -> CoordinateSource {
        match &self.coordinates_endpoint {
            Some(endpoint) => CoordinateSource::Service {
                endpoint: endpoint.clone(),
                concurrent_requests: self.concurrent_requests,
                timeout_seconds: None,
            },
            None => CoordinateSource::File {
                path: self.coordinates_file.clone(),
            },
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn report_formats(&self) -> &[String] {
        &self.report_formats
    }

    fn archive_outputs(&self) -> bool {
        self.archive
    }

    fn model(&self) -> &ModelConfig {
        &self.model
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("routes_file", &self.routes_file)?;
        validate_path("output_path", &self.output_path)?;
        validate_path("output_file", &self.output_file)?;
        validate_allowed_values("report_formats", &self.report_formats, REPORT_FORMATS)?;
        self.coordinate_source().validate()?;
        self.model.validate()
    }
}
