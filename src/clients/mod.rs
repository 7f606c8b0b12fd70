//! Upstream data clients
//!
//! Thin wrappers over the Open-Meteo weather and flood APIs. These are the
//! only places the backend talks to the outside world for signal data; they
//! normalize provider responses into `SignalSet`-shaped values before the
//! engine ever sees them.

pub mod river;
pub mod weather;

pub use river::RiverClient;
pub use weather::{RainfallReport, WeatherClient};

use thiserror::Error;

/// Errors from the upstream data providers.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
}
