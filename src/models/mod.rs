//! Data models for forecasts and computed statistics

pub mod forecast;
pub mod stats;

pub use forecast::{
    CityForecast, ForecastDay, ForecastHour, GOOD_WEATHER_CONDITIONS, WeatherCondition,
};
pub use stats::{CityDayStats, CityStats};
