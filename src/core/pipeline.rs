use crate::adapters::coordinates::{cities_in, CoordinateTable, HttpCoordinateSource};
use crate::adapters::report::{bundle_archive, ReplacementReport, ARCHIVE_FILE};
use crate::adapters::reporter::TracingReporter;
use crate::adapters::route_file;
use crate::config::model::CoordinateSource;
use crate::core::optimizer::RouteOptimizer;
use crate::domain::model::{OptimizationOutcome, Route};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use reqwest::Client;

pub struct FlightPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> FlightPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 只查詢航線實際用到的城市座標
    pub async fn load_coordinates(&self, routes: &[Route]) -> Result<CoordinateTable> {
        match self.config.coordinate_source() {
            CoordinateSource::File { path } => {
                tracing::debug!("Reading coordinate table from: {}", path);
                let data = self.storage.read_file(&path).await?;
                CoordinateTable::from_csv(&data)
            }
            CoordinateSource::Service {
                endpoint,
                concurrent_requests,
                timeout_seconds,
            } => {
                let source = HttpCoordinateSource::new(
                    self.client.clone(),
                    endpoint,
                    concurrent_requests,
                    timeout_seconds,
                );
                source.resolve_all(&cities_in(routes)).await
            }
        }
    }

    fn output_location(&self, file_name: &str) -> String {
        format!(
            "{}/{}",
            self.config.output_path().trim_end_matches('/'),
            file_name
        )
    }

    async fn discard_staged(&self, staged: &[(String, String)]) {
        for (partial, _) in staged {
            if let Err(e) = self.storage.remove_file(partial).await {
                tracing::debug!("Could not remove staged file {}: {}", partial, e);
            }
        }
    }

    /// 先產生所有輸出內容，確保失敗時不會留下部分檔案
    fn render_outputs(&self, outcome: &OptimizationOutcome) -> Result<Vec<(String, Vec<u8>)>> {
        let mut outputs = vec![(
            self.config.output_file().to_string(),
            route_file::serialize_routes(&outcome.profitable)?,
        )];

        if !self.config.report_formats().is_empty() {
            let report = ReplacementReport::from_outcome(outcome, self.config.model());
            for format in self.config.report_formats() {
                outputs.push(report.render(format)?);
            }
        }

        Ok(outputs)
    }
}

/// 暫存檔與目標檔放在同一目錄，改名才不會跨檔案系統
fn staging_name(file_name: &str) -> String {
    match file_name.rsplit_once('/') {
        Some((dir, name)) => format!("{}/.{}.partial", dir, name),
        None => format!(".{}.partial", file_name),
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FlightPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Route>> {
        tracing::debug!("Reading routes from: {}", self.config.routes_file());
        let data = self.storage.read_file(self.config.routes_file()).await?;
        route_file::parse_routes(&data)
    }

    async fn transform(&self, routes: Vec<Route>) -> Result<OptimizationOutcome> {
        let coordinates = self.load_coordinates(&routes).await?;
        tracing::info!("🗺️ Resolved {} city coordinates", coordinates.len());

        RouteOptimizer::new(self.config.model(), &coordinates).optimize(&routes, &TracingReporter)
    }

    async fn load(&self, outcome: OptimizationOutcome) -> Result<String> {
        let outputs = self.render_outputs(&outcome)?;

        if self.config.archive_outputs() {
            tracing::debug!("Creating ZIP archive with {} files", outputs.len());
            let zip_data = bundle_archive(&outputs)?;
            let location = self.output_location(ARCHIVE_FILE);
            self.storage.write_file(&location, &zip_data).await?;
            return Ok(location);
        }

        // 先寫入暫存檔，全部成功後才改名
        let mut staged = Vec::with_capacity(outputs.len());
        for (file_name, data) in &outputs {
            let partial = self.output_location(&staging_name(file_name));
            tracing::debug!("Staging {} ({} bytes)", partial, data.len());
            let written = self.storage.write_file(&partial, data).await;
            staged.push((partial, self.output_location(file_name)));

            if let Err(e) = written {
                self.discard_staged(&staged).await;
                return Err(e);
            }
        }

        for (partial, location) in &staged {
            self.storage.rename_file(partial, location).await?;
        }

        Ok(self.output_location(self.config.output_file()))
    }
}
