//! River client (Open-Meteo flood API)
//!
//! Fetches the daily river discharge for a coordinate. Districts without a
//! gauged river nearby come back empty; that reads as 0 m³/s, which the
//! normalizer treats as "no river contribution".

use serde::Deserialize;

use super::ClientError;

pub const DEFAULT_RIVER_API_URL: &str = "https://flood-api.open-meteo.com/v1/flood";

#[derive(Debug, Default, Deserialize)]
struct FloodResponse {
    #[serde(default)]
    daily: DailyBlock,
}

#[derive(Debug, Default, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    river_discharge: Vec<Option<f64>>,
}

/// Open-Meteo flood API client.
#[derive(Debug, Clone)]
pub struct RiverClient {
    http: reqwest::Client,
    base_url: String,
}

impl RiverClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Today's river discharge in m³/s (0 when the provider has no data).
    pub async fn fetch_discharge(&self, lat: f64, lon: f64) -> Result<f64, ClientError> {
        let response: FloodResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("daily", "river_discharge".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(first_discharge(&response.daily.river_discharge))
    }
}

fn first_discharge(series: &[Option<f64>]) -> f64 {
    series.first().copied().flatten().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_discharge_present() {
        assert_eq!(first_discharge(&[Some(512.5), Some(600.0)]), 512.5);
    }

    #[test]
    fn test_missing_discharge_reads_as_zero() {
        assert_eq!(first_discharge(&[]), 0.0);
        assert_eq!(first_discharge(&[None]), 0.0);
    }

    #[test]
    fn test_response_with_no_daily_block_deserializes() {
        let response: FloodResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_discharge(&response.daily.river_discharge), 0.0);
    }
}
