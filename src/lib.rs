//! citycast - concurrent city weather forecast analysis and ranking
//!
//! This library fetches multi-day hourly forecasts for a list of cities,
//! computes daytime temperature and good-weather statistics, ranks the
//! cities, and exports a CSV report naming the best city to visit.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod provider;

// Re-export core types for public API
pub use config::CitycastConfig;
pub use error::CitycastError;
pub use models::{
    CityDayStats, CityForecast, CityStats, ForecastDay, ForecastHour, WeatherCondition,
};
pub use pipeline::PipelineReport;
pub use provider::{ForecastProvider, HttpForecastProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CitycastError>;
