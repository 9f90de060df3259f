//! Typed forecast records parsed from raw provider payloads
//!
//! Validation lives in the record constructors: a payload that names an
//! unknown weather condition or an out-of-range hour fails to parse, and the
//! offending city is reported through `CitycastError::Validation`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CitycastError;

/// Recognized weather condition vocabulary
///
/// The serde representation matches the kebab-case labels the provider emits.
/// Deserializing any label outside this set fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Overcast,
    Drizzle,
    LightRain,
    Rain,
    ModerateRain,
    HeavyRain,
    ContinuousHeavyRain,
    Showers,
    WetSnow,
    LightSnow,
    Snow,
    SnowShowers,
    Hail,
    Thunderstorm,
    ThunderstormWithRain,
    ThunderstormWithHail,
}

/// The subset of conditions counted as good weather
pub const GOOD_WEATHER_CONDITIONS: [WeatherCondition; 4] = [
    WeatherCondition::Clear,
    WeatherCondition::PartlyCloudy,
    WeatherCondition::Cloudy,
    WeatherCondition::Overcast,
];

impl WeatherCondition {
    /// Whether this condition belongs to the good-weather subset
    #[must_use]
    pub fn is_good_weather(self) -> bool {
        GOOD_WEATHER_CONDITIONS.contains(&self)
    }
}

/// One hourly forecast entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastHour {
    /// Hour of day, 0-23
    #[serde(deserialize_with = "deserialize_hour")]
    pub hour: u8,
    /// Temperature in whole degrees Celsius
    pub temperature: i32,
    /// Weather condition label for this hour
    pub condition: WeatherCondition,
}

fn deserialize_hour<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let hour = u8::deserialize(deserializer)?;
    if hour > 23 {
        return Err(serde::de::Error::custom(format!(
            "hour {hour} out of range 0-23"
        )));
    }
    Ok(hour)
}

/// One forecast day; `hours` may legitimately be empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date of this forecast day
    pub date: NaiveDate,
    /// Hourly entries in hour order
    #[serde(default)]
    pub hours: Vec<ForecastHour>,
}

/// Raw provider payload shape: a `forecasts` array of days. Extra fields the
/// provider sends alongside it are ignored.
#[derive(Debug, Deserialize)]
struct ForecastPayload {
    forecasts: Vec<ForecastDay>,
}

/// Validated multi-day forecast for one city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityForecast {
    /// City identifier this forecast belongs to
    pub city_name: String,
    /// Forecast days in provider order
    pub days: Vec<ForecastDay>,
}

impl CityForecast {
    /// Attach the originating city identifier to a raw payload and validate
    /// it into a typed forecast. The payload itself does not carry the city
    /// name, so the caller supplies it.
    pub fn from_payload(
        city_name: &str,
        payload: serde_json::Value,
    ) -> Result<Self, CitycastError> {
        let payload: ForecastPayload = serde_json::from_value(payload)
            .map_err(|e| CitycastError::validation(city_name, e.to_string()))?;
        Ok(Self {
            city_name: city_name.to_owned(),
            days: payload.forecasts,
        })
    }
}
