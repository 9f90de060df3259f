//! The four-stage forecast analysis pipeline
//!
//! Data flows strictly from fetch through aggregation and ranking to export;
//! the stages run sequentially relative to each other and parallelize
//! internally.

pub mod aggregate;
pub mod export;
pub mod fetch;
pub mod rank;

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::info;

use crate::config::CitycastConfig;
use crate::error::CitycastError;
use crate::models::CityStats;
use crate::provider::ForecastProvider;

/// Result of a full pipeline run
#[derive(Debug)]
pub struct PipelineReport {
    /// Top-ranked city name
    pub best_city: String,
    /// Location of the written CSV artifact
    pub output_path: PathBuf,
    /// Ranked statistics, best city first
    pub cities: Vec<CityStats>,
}

/// Run fetch, aggregation, ranking and export over the requested cities.
///
/// Duplicate city identifiers are dropped up front; the first occurrence
/// wins. Cities that fail to fetch or aggregate are excluded along the way,
/// so the report may cover fewer cities than requested. An empty surviving
/// set is an error: there is nothing to rank or export.
pub async fn run<P: ForecastProvider>(
    provider: &P,
    cities: &[String],
    config: &CitycastConfig,
) -> Result<PipelineReport, CitycastError> {
    let cities = dedupe(cities);
    if cities.is_empty() {
        return Err(CitycastError::config("no cities requested"));
    }
    info!("Starting pipeline for {} cities", cities.len());

    let forecasts = fetch::fetch(provider, &cities, config.fetch.io_headroom).await;
    let stats = aggregate::aggregate(forecasts).await;
    let ranked = rank::rank(stats);
    let best_city = rank::best_city(&ranked)
        .ok_or_else(|| CitycastError::empty("every requested city was dropped before ranking"))?
        .to_owned();
    export::export(&ranked, &config.export.output_path).await?;

    info!("Pipeline finished; best city is {}", best_city);
    Ok(PipelineReport {
        best_city,
        output_path: config.export.output_path.clone(),
        cities: ranked,
    })
}

/// Drop duplicate city identifiers, keeping the first occurrence of each
fn dedupe(cities: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    cities
        .iter()
        .filter(|city| seen.insert(city.as_str()))
        .cloned()
        .collect()
}
