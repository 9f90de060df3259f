//! Computed per-city statistics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statistics for one forecast day with at least one daytime-window hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDayStats {
    /// Calendar date of the day
    pub date: NaiveDate,
    /// Mean daytime temperature, rounded to one decimal
    pub average_temperature: f64,
    /// Count of daytime hours with a good-weather condition
    pub good_weather_hours: u32,
}

/// Aggregated statistics for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    /// City identifier these statistics belong to
    pub city_name: String,
    /// Per-day statistics in forecast order
    pub days: Vec<CityDayStats>,
    /// Mean of the per-day average temperatures, rounded to one decimal
    pub total_average_temperature: f64,
    /// Mean of the per-day good-weather hour counts, rounded to one decimal
    pub total_average_good_weather_hours: f64,
    /// 1-based position after ranking; `None` until the ranking stage runs
    pub rank: Option<u32>,
}

impl CityStats {
    /// Dates of the days these statistics cover, in order
    #[must_use]
    pub fn day_dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|day| day.date).collect()
    }
}
