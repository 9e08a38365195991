use anyhow::Context;
use clap::Parser;
use flight_optimizer::config::toml_config::TomlConfig;
use flight_optimizer::config::CoordinateSource;
use flight_optimizer::core::{ConfigProvider, Pipeline};
use flight_optimizer::utils::{logger, validation::Validate};
use flight_optimizer::{FlightPipeline, LocalStorage, OptimizerEngine};

#[derive(Parser)]
#[command(name = "toml-optimizer")]
#[command(about = "Route optimization driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "optimizer.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the profit threshold from config
    #[arg(long)]
    profit_threshold: Option<f64>,

    /// Run the computation and print a summary without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based route optimizer");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(threshold) = args.profit_threshold {
        config.model.profit_threshold = threshold;
        tracing::info!("🔧 Profit threshold overridden to: {}", threshold);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let storage = LocalStorage::new(".".to_string());
    let pipeline = FlightPipeline::new(storage, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        return perform_dry_run(&pipeline).await;
    }

    let engine = OptimizerEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Route optimization completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Optimization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let model = config.model();

    println!("📋 Configuration Summary:");
    println!("  Run: {}", config.run.name);
    println!("  Routes: {}", config.routes_file());
    match config.coordinate_source() {
        CoordinateSource::File { path } => println!("  Coordinates: {} (CSV)", path),
        CoordinateSource::Service {
            endpoint,
            concurrent_requests,
            ..
        } => println!(
            "  Coordinates: {} ({} concurrent requests)",
            endpoint, concurrent_requests
        ),
    }
    println!("  Output: {}/{}", config.output_path(), config.output_file());
    println!("  Profit Threshold: {}", model.profit_threshold);
    println!("  Aircraft Capacity: {}", model.aircraft_capacity);
    println!("  Reallocation: {}", model.reallocation_policy);

    if !config.report_formats().is_empty() {
        println!("  Reports: {}", config.report_formats().join(", "));
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(pipeline: &FlightPipeline<LocalStorage, TomlConfig>) -> anyhow::Result<()> {
    let routes = pipeline.extract().await.context("Failed to load routes")?;
    let total = routes.len();
    let outcome = pipeline
        .transform(routes)
        .await
        .context("Route optimization failed")?;

    println!("🔍 Dry Run Analysis:");
    println!("  Routes loaded: {}", total);
    println!("  Profitable: {}", outcome.profitable.len());
    println!("  Eliminated: {}", outcome.eliminated.len());
    println!();

    println!("🔁 Replacements:");
    for pairing in outcome.mapping.pairings() {
        println!(
            "  Flight {}: {} -> Flight {}: {}",
            pairing.eliminated.flight_number,
            pairing.eliminated.path(),
            pairing.replacement.flight_number,
            pairing.replacement.path()
        );
    }

    println!();
    println!("✅ Dry run complete. Nothing was written.");
    Ok(())
}
