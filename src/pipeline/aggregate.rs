//! Aggregation stage: per-city daytime-window statistics
//!
//! CPU-bound and parallelized across cities; each city is an independent
//! blocking worker with no shared mutable state.

use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::CitycastError;
use crate::models::{CityDayStats, CityForecast, CityStats};

/// First hour of the daytime window, inclusive
pub const MIN_HOUR: u8 = 9;
/// Last hour of the daytime window, inclusive
pub const MAX_HOUR: u8 = 19;

/// Fixed divisor for per-day averages. Days with fewer in-window hours still
/// divide by the full window length, weighting partial data down.
const WINDOW_LENGTH: f64 = (MAX_HOUR - MIN_HOUR) as f64;

/// Compute statistics for every fetched city, one blocking worker per city.
///
/// A city whose days all lack daytime hours has undefined totals; it is
/// reported and excluded rather than aborting the batch. Result order follows
/// worker completion.
pub async fn aggregate(forecasts: Vec<CityForecast>) -> Vec<CityStats> {
    let total = forecasts.len();
    info!("Aggregating statistics for {} cities", total);

    let mut workers = JoinSet::new();
    for forecast in forecasts {
        workers.spawn_blocking(move || aggregate_city(&forecast));
    }

    let mut stats = Vec::with_capacity(total);
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(Ok(city_stats)) => stats.push(city_stats),
            Ok(Err(err)) => error!("Excluding city from the report: {}", err),
            Err(err) => error!("Aggregation worker failed: {}", err),
        }
    }

    info!("Aggregated {} of {} cities", stats.len(), total);
    stats
}

/// Compute one city's statistics. Pure function of its input.
fn aggregate_city(forecast: &CityForecast) -> Result<CityStats, CitycastError> {
    let mut days = Vec::with_capacity(forecast.days.len());
    let mut temperature_total = 0.0;
    let mut good_weather_total = 0.0;

    for day in &forecast.days {
        let in_window: Vec<_> = day
            .hours
            .iter()
            .filter(|hour| (MIN_HOUR..=MAX_HOUR).contains(&hour.hour))
            .collect();
        // A day without daytime data is skipped entirely: no output entry,
        // and it does not count in the totals' denominators.
        if in_window.is_empty() {
            continue;
        }

        let temperature_sum: i64 = in_window
            .iter()
            .map(|hour| i64::from(hour.temperature))
            .sum();
        let good_weather_hours = in_window
            .iter()
            .filter(|hour| hour.condition.is_good_weather())
            .count() as u32;

        let day_average = temperature_sum as f64 / WINDOW_LENGTH;
        temperature_total += day_average;
        good_weather_total += f64::from(good_weather_hours);

        days.push(CityDayStats {
            date: day.date,
            average_temperature: round1(day_average),
            good_weather_hours,
        });
    }

    if days.is_empty() {
        return Err(CitycastError::aggregation(
            forecast.city_name.as_str(),
            "no day carries daytime hours; totals would divide by zero",
        ));
    }

    let day_count = days.len() as f64;
    Ok(CityStats {
        city_name: forecast.city_name.clone(),
        total_average_temperature: round1(temperature_total / day_count),
        total_average_good_weather_hours: round1(good_weather_total / day_count),
        days,
        rank: None,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastDay, ForecastHour, WeatherCondition};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    fn hour(hour: u8, temperature: i32, condition: WeatherCondition) -> ForecastHour {
        ForecastHour {
            hour,
            temperature,
            condition,
        }
    }

    fn forecast(city: &str, days: Vec<ForecastDay>) -> CityForecast {
        CityForecast {
            city_name: city.to_string(),
            days,
        }
    }

    #[test]
    fn test_day_average_divides_by_window_length() {
        // Eleven in-window hours at 20 degrees: sum 220, divisor stays 10.
        let hours = (MIN_HOUR..=MAX_HOUR)
            .map(|h| hour(h, 20, WeatherCondition::Clear))
            .collect();
        let city = forecast("BEIJING", vec![ForecastDay { date: date(1), hours }]);

        let stats = aggregate_city(&city).unwrap();
        assert_eq!(stats.days[0].average_temperature, 22.0);
        assert_eq!(stats.days[0].good_weather_hours, 11);
    }

    #[test]
    fn test_sparse_day_is_weighted_down() {
        // Five in-window hours at 20 degrees still divide by 10, not 5.
        let hours = (9..14).map(|h| hour(h, 20, WeatherCondition::Rain)).collect();
        let city = forecast("MOSCOW", vec![ForecastDay { date: date(1), hours }]);

        let stats = aggregate_city(&city).unwrap();
        assert_eq!(stats.days[0].average_temperature, 10.0);
        assert_eq!(stats.days[0].good_weather_hours, 0);
    }

    #[test]
    fn test_out_of_window_hours_are_ignored() {
        let hours = vec![
            hour(3, -40, WeatherCondition::Snow),
            hour(12, 15, WeatherCondition::Clear),
            hour(22, 50, WeatherCondition::Clear),
        ];
        let city = forecast("MOSCOW", vec![ForecastDay { date: date(1), hours }]);

        let stats = aggregate_city(&city).unwrap();
        assert_eq!(stats.days[0].average_temperature, 1.5);
        assert_eq!(stats.days[0].good_weather_hours, 1);
    }

    #[test]
    fn test_days_without_daytime_hours_are_skipped() {
        let city = forecast(
            "PARIS",
            vec![
                ForecastDay {
                    date: date(1),
                    hours: vec![],
                },
                ForecastDay {
                    date: date(2),
                    hours: vec![hour(2, 30, WeatherCondition::Clear)],
                },
                ForecastDay {
                    date: date(3),
                    hours: vec![hour(10, 10, WeatherCondition::Clear)],
                },
            ],
        );

        let stats = aggregate_city(&city).unwrap();
        // Only the third day counts, in the output and in the denominators.
        assert_eq!(stats.days.len(), 1);
        assert_eq!(stats.days[0].date, date(3));
        assert_eq!(stats.total_average_temperature, 1.0);
        assert_eq!(stats.total_average_good_weather_hours, 1.0);
    }

    #[test]
    fn test_city_without_valid_days_is_an_error() {
        let city = forecast(
            "REYKJAVIK",
            vec![
                ForecastDay {
                    date: date(1),
                    hours: vec![],
                },
                ForecastDay {
                    date: date(2),
                    hours: vec![hour(23, 5, WeatherCondition::Clear)],
                },
            ],
        );

        let err = aggregate_city(&city).unwrap_err();
        assert!(matches!(err, CitycastError::Aggregation { .. }));
        assert_eq!(err.city(), Some("REYKJAVIK"));
    }

    #[test]
    fn test_totals_average_over_counted_days() {
        let day = |d: u32, temp: i32, good: usize| ForecastDay {
            date: date(d),
            hours: (9..19)
                .enumerate()
                .map(|(i, h)| {
                    let condition = if i < good {
                        WeatherCondition::Clear
                    } else {
                        WeatherCondition::Rain
                    };
                    hour(h, temp, condition)
                })
                .collect(),
        };
        // Day averages 10.0 and 20.0, good-weather hours 2 and 5.
        let city = forecast("KAZAN", vec![day(1, 10, 2), day(2, 20, 5)]);

        let stats = aggregate_city(&city).unwrap();
        assert_eq!(stats.total_average_temperature, 15.0);
        assert_eq!(stats.total_average_good_weather_hours, 3.5);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let hours: Vec<_> = (9..=19)
            .map(|h| hour(h, 7, WeatherCondition::Drizzle))
            .collect();
        let city = forecast(
            "LONDON",
            vec![ForecastDay {
                date: date(1),
                hours,
            }],
        );

        let first = aggregate_city(&city).unwrap();
        let second = aggregate_city(&city).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_aggregate_pool_excludes_failing_city_only() {
        let good_hours: Vec<_> = (9..=19)
            .map(|h| hour(h, 10, WeatherCondition::Clear))
            .collect();
        let cities = vec![
            forecast(
                "MOSCOW",
                vec![ForecastDay {
                    date: date(1),
                    hours: good_hours,
                }],
            ),
            forecast(
                "REYKJAVIK",
                vec![ForecastDay {
                    date: date(1),
                    hours: vec![],
                }],
            ),
        ];

        let stats = aggregate(cities).await;
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].city_name, "MOSCOW");
        assert_eq!(stats[0].rank, None);
    }
}
