use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use tokio::sync::Mutex;

/// Drives a pipeline through extract, transform and load.
pub struct OptimizerEngine<P: Pipeline> {
    pipeline: P,
    monitor: Mutex<SystemMonitor>,
}

impl<P: Pipeline> OptimizerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: Mutex::new(SystemMonitor::new(monitor_enabled)),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting route optimization");
        let mut monitor = self.monitor.lock().await;

        // Extract
        let routes = self.pipeline.extract().await?;
        tracing::info!("📥 Loaded {} routes", routes.len());
        monitor.log_stats("Extract");

        // Transform
        let outcome = self.pipeline.transform(routes).await?;
        tracing::info!(
            "🧮 {} routes kept, {} eliminated, {} replacements",
            outcome.profitable.len(),
            outcome.eliminated.len(),
            outcome.mapping.len()
        );
        monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(outcome).await?;
        tracing::info!("💾 Output saved to: {}", output_path);
        monitor.log_stats("Load");
        monitor.log_final_stats();

        Ok(output_path)
    }
}
