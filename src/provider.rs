//! Forecast provider adapters
//!
//! The pipeline consumes any [`ForecastProvider`]; the shipped implementation
//! fetches one JSON document per city from a static file host.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::CitycastError;

/// Upstream source of raw per-city forecast payloads
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch the raw forecast payload for one city identifier
    async fn get_forecast(&self, city_name: &str) -> Result<Value, CitycastError>;
}

/// HTTP provider serving `{base_url}/{CITY}-response.json` documents
pub struct HttpForecastProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpForecastProvider {
    /// Create a new HTTP provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, CitycastError> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("citycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CitycastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn payload_url(&self, city_name: &str) -> String {
        format!("{}/{city_name}-response.json", self.base_url)
    }
}

#[async_trait]
impl ForecastProvider for HttpForecastProvider {
    async fn get_forecast(&self, city_name: &str) -> Result<Value, CitycastError> {
        let url = self.payload_url(city_name);
        debug!("Requesting forecast payload from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CitycastError::provider(city_name, e.to_string()))?
            .error_for_status()
            .map_err(|e| CitycastError::provider(city_name, e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| CitycastError::provider(city_name, format!("invalid JSON body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_url_layout() {
        let provider = HttpForecastProvider::new(&ProviderConfig {
            base_url: "https://example.com/data/".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();
        assert_eq!(
            provider.payload_url("MOSCOW"),
            "https://example.com/data/MOSCOW-response.json"
        );
    }
}
