use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use citycast::config::CitycastConfig;
use citycast::pipeline;
use citycast::provider::HttpForecastProvider;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional single argument: path to a TOML config file.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = CitycastConfig::load(config_path.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    info!("Analyzing weather for {} cities", config.cities.len());
    let provider =
        HttpForecastProvider::new(&config.provider).context("Failed to create provider")?;
    let report = pipeline::run(&provider, &config.cities, &config)
        .await
        .context("Pipeline failed")?;

    println!("Best city to visit: {}", report.best_city);
    println!("Report written to {}", report.output_path.display());
    Ok(())
}
