//! Weather client (Open-Meteo forecast API)
//!
//! Requests hourly rain + precipitation probability with 24h of history and
//! 24h of forecast, then folds the series into the trailing/forecast metrics
//! the engine consumes. Missing samples count as 0 - absence of data is
//! never an error here.

use serde::Deserialize;

use crate::engine::SignalSet;

use super::ClientError;

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hours of history requested; the first PAST_HOURS samples of the series
/// trail the request time, the rest are forecast.
const PAST_HOURS: usize = 24;
const FORECAST_HOURS: usize = 24;

/// Aggregated rainfall picture for one coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RainfallReport {
    /// Rainfall summed over the trailing 24h (mm)
    pub rainfall_last_24h: f64,
    /// Max hourly intensity over the trailing 24h (mm/h)
    pub max_rain_intensity_1h: f64,
    /// Max precipitation probability across the series (0-100)
    pub max_rain_prob: f64,
    /// Forecast rainfall sums (mm)
    pub forecast_rain_6h: f64,
    pub forecast_rain_12h: f64,
    pub forecast_rain_24h: f64,
    /// Max forecast hourly intensity (mm/h)
    pub forecast_max_intensity_1h: f64,
}

impl RainfallReport {
    /// Combine with a river reading into the engine's input record.
    pub fn signal_set(&self, river_discharge: f64) -> SignalSet {
        SignalSet {
            intensity_1h: self.max_rain_intensity_1h,
            accumulation_24h: self.rainfall_last_24h,
            river_discharge,
            forecast_rain_prob: self.max_rain_prob,
            forecast_rain_6h: self.forecast_rain_6h,
            forecast_rain_12h: self.forecast_rain_12h,
            forecast_rain_24h: self.forecast_rain_24h,
            forecast_max_intensity_1h: self.forecast_max_intensity_1h,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    hourly: HourlyBlock,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    rain: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
}

/// Open-Meteo forecast client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch and aggregate the rainfall picture for a coordinate.
    pub async fn fetch_rainfall(&self, lat: f64, lon: f64) -> Result<RainfallReport, ClientError> {
        let response: ForecastResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hourly", "rain,precipitation_probability".to_string()),
                ("past_hours", PAST_HOURS.to_string()),
                ("forecast_hours", FORECAST_HOURS.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(aggregate_hourly(
            &response.hourly.rain,
            &response.hourly.precipitation_probability,
        ))
    }
}

/// Fold the hourly series into a report. Pure - separated from the HTTP
/// call so it can be tested without a network.
pub fn aggregate_hourly(rain: &[Option<f64>], prob: &[Option<f64>]) -> RainfallReport {
    let sample = |i: usize| rain.get(i).copied().flatten().unwrap_or(0.0);

    let mut report = RainfallReport::default();

    for i in 0..PAST_HOURS.min(rain.len()) {
        let r = sample(i);
        report.rainfall_last_24h += r;
        if r > report.max_rain_intensity_1h {
            report.max_rain_intensity_1h = r;
        }
    }

    for i in PAST_HOURS..rain.len() {
        let r = sample(i);
        let hours_out = i - PAST_HOURS;
        if hours_out < 6 {
            report.forecast_rain_6h += r;
        }
        if hours_out < 12 {
            report.forecast_rain_12h += r;
        }
        if hours_out < 24 {
            report.forecast_rain_24h += r;
        }
        if r > report.forecast_max_intensity_1h {
            report.forecast_max_intensity_1h = r;
        }
    }

    for p in prob.iter().copied().flatten() {
        if p > report.max_rain_prob {
            report.max_rain_prob = p;
        }
    }

    report
}
