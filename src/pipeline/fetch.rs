//! Fetch stage: concurrent provider fan-out with per-city failure isolation

use std::num::NonZeroUsize;
use std::thread;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::error::CitycastError;
use crate::models::CityForecast;
use crate::provider::ForecastProvider;

/// Concurrently fetch and validate forecasts for every requested city.
///
/// One provider call is issued per city, with at most
/// `available_parallelism + io_headroom` requests in flight. A city that
/// fails, whether on the provider call or on payload validation, is logged
/// and dropped from the result; one bad city never aborts the batch. Result
/// order follows completion, not input order.
pub async fn fetch<P: ForecastProvider>(
    provider: &P,
    cities: &[String],
    io_headroom: usize,
) -> Vec<CityForecast> {
    let limit = thread::available_parallelism().map_or(4, NonZeroUsize::get) + io_headroom;
    info!(
        "Fetching forecasts for {} cities ({} requests in flight)",
        cities.len(),
        limit
    );

    let results: Vec<Result<CityForecast, CitycastError>> = stream::iter(cities)
        .map(|city| fetch_city(provider, city))
        .buffer_unordered(limit)
        .collect()
        .await;

    let forecasts: Vec<CityForecast> = results
        .into_iter()
        .filter_map(|result| match result {
            Ok(forecast) => Some(forecast),
            Err(err) => {
                warn!("Dropping city from the batch: {}", err);
                None
            }
        })
        .collect();

    info!("Fetched {} of {} cities", forecasts.len(), cities.len());
    forecasts
}

/// Fetch one city's payload and validate it into a typed forecast. The raw
/// payload does not carry the city name, so it is attached here before
/// structural validation.
async fn fetch_city<P: ForecastProvider>(
    provider: &P,
    city_name: &str,
) -> Result<CityForecast, CitycastError> {
    let payload = provider.get_forecast(city_name).await?;
    CityForecast::from_payload(city_name, payload)
}
