use crate::config::model::{CoordinateSource, ModelConfig};
use crate::domain::model::{
    Coordinate, OptimizationOutcome, ReplacementMapping, ReplacementPairing, Route,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn rename_file(
        &self,
        from: &str,
        to: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Resolves a city code to its coordinate, failing with `LookupError` when unknown.
pub trait CoordinateLookup: Send + Sync {
    fn coordinate(&self, city: &str) -> Result<Coordinate>;
}

/// Diagnostic sink for replacement decisions. Nothing it returns feeds back
/// into the computation.
pub trait Reporter: Send + Sync {
    fn report_replacement(&self, pairing: &ReplacementPairing);
    fn report_mapping(&self, mapping: &ReplacementMapping);
}

pub trait ConfigProvider: Send + Sync {
    fn routes_file(&self) -> &str;
    fn coordinate_source(&self) -> CoordinateSource;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn report_formats(&self) -> &[String];
    fn archive_outputs(&self) -> bool;
    fn model(&self) -> &ModelConfig;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Route>>;
    async fn transform(&self, routes: Vec<Route>) -> Result<OptimizationOutcome>;
    async fn load(&self, outcome: OptimizationOutcome) -> Result<String>;
}
