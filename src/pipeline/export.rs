//! Export stage: serialize ranked statistics into the CSV report
//!
//! The header is written in truncate mode; data rows are appended by
//! concurrent tasks. Row formatting happens outside the lock; only the
//! physical write of one row holds the shared file handle.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::info;

use crate::error::CitycastError;
use crate::models::CityStats;

const CITY_COLUMN_LABEL: &str = "City/day";
const TEMPERATURE_ROW_LABEL: &str = "Temperature, avg";
const GOOD_WEATHER_ROW_LABEL: &str = "Good weather, hours";
const AVERAGE_COLUMN_LABEL: &str = "Average";
const RANK_COLUMN_LABEL: &str = "Rank";

/// Write the ranked statistics table to `path`.
///
/// Date columns come from the first city's day list; every city must share
/// that exact ordered date set, otherwise the export fails before any row is
/// written. Two data rows are emitted per city: temperature and good-weather
/// hours.
pub async fn export(cities: &[CityStats], path: &Path) -> Result<(), CitycastError> {
    let first = cities
        .first()
        .ok_or_else(|| CitycastError::export("no cities to export"))?;
    check_date_alignment(first, cities)?;

    // Truncates any artifact from a previous run; rows append below.
    let mut file = File::create(path).await?;
    file.write_all(&encode_row(&header_fields(first))?).await?;

    let file = Arc::new(Mutex::new(file));
    let mut writers = JoinSet::new();
    for city in cities {
        for row in city_rows(city) {
            let file = Arc::clone(&file);
            writers.spawn(async move {
                let bytes = encode_row(&row)?;
                let mut file = file.lock().await;
                file.write_all(&bytes).await?;
                Ok::<(), CitycastError>(())
            });
        }
    }

    while let Some(joined) = writers.join_next().await {
        joined.map_err(|e| CitycastError::export(format!("row writer panicked: {e}")))??;
    }
    file.lock().await.flush().await?;

    info!("CSV report written to {}", path.display());
    Ok(())
}

fn check_date_alignment(first: &CityStats, cities: &[CityStats]) -> Result<(), CitycastError> {
    let expected = first.day_dates();
    for city in cities {
        if city.day_dates() != expected {
            return Err(CitycastError::export(format!(
                "date columns for '{}' do not match '{}'; refusing to emit a misaligned table",
                city.city_name, first.city_name
            )));
        }
    }
    Ok(())
}

fn header_fields(first: &CityStats) -> Vec<String> {
    let mut header = vec![CITY_COLUMN_LABEL.to_owned(), String::new()];
    header.extend(first.days.iter().map(|day| format_date(day.date)));
    header.push(AVERAGE_COLUMN_LABEL.to_owned());
    header.push(RANK_COLUMN_LABEL.to_owned());
    header
}

/// The two data rows of one city: temperature, then good-weather hours
fn city_rows(city: &CityStats) -> [Vec<String>; 2] {
    let mut temperature = vec![city.city_name.clone(), TEMPERATURE_ROW_LABEL.to_owned()];
    temperature.extend(
        city.days
            .iter()
            .map(|day| format!("{:.1}", day.average_temperature)),
    );
    temperature.push(format!("{:.1}", city.total_average_temperature));
    temperature.push(city.rank.map_or_else(String::new, |rank| rank.to_string()));

    let mut good_weather = vec![String::new(), GOOD_WEATHER_ROW_LABEL.to_owned()];
    good_weather.extend(
        city.days
            .iter()
            .map(|day| day.good_weather_hours.to_string()),
    );
    good_weather.push(format!("{:.1}", city.total_average_good_weather_hours));
    good_weather.push(String::new());

    [temperature, good_weather]
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Encode one row as a comma-delimited line with every field quoted
fn encode_row(fields: &[String]) -> Result<Vec<u8>, CitycastError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| CitycastError::export(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| CitycastError::export(e.to_string()))
}
