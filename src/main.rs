//! HydraSense Backend Server
//!
//! Flood risk monitoring backend: ingests rainfall and river-discharge
//! signals per monitored district, fuses them into a classified risk state
//! with temporal hysteresis, and serves the results.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     HYDRASENSE BACKEND                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────────┐  ┌─────────────────────┐ │
//! │  │  API      │  │  Update Job    │  │  Fusion Engine      │ │
//! │  │  (Axum)   │  │  (interval)    │  │  (pure, per tick)   │ │
//! │  └─────┬─────┘  └───────┬────────┘  └──────────┬──────────┘ │
//! │        │                │      ▲               │            │
//! │        │                ▼      │ weather/river │            │
//! │        │         ┌────────────┴──┐ (Open-Meteo)│            │
//! │        └────────►│  PostgreSQL   │◄────────────┘            │
//! │                  └───────────────┘                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod clients;
mod config;
mod db;
mod engine;
mod error;
mod handlers;
mod models;
mod scheduler;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clients::{RiverClient, WeatherClient};
use engine::StructuralZone;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hydrasense_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("HydraSense backend starting...");
    tracing::info!(
        "Database: {}",
        config.database_url.split('@').last().unwrap_or("***")
    );

    // Initialize database pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run migrations + seed reference data
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // The structural zone table is static reference data - load once
    let zones = models::zone::load_all(&pool)
        .await
        .expect("Failed to load structural zones");
    tracing::info!("Loaded {} structural zones", zones.len());

    // Build application state
    let state = AppState {
        pool,
        zones: Arc::new(zones),
        weather: WeatherClient::new(config.weather_api_url.clone()),
        river: RiverClient::new(config.river_api_url.clone()),
        config: config.clone(),
    };

    // Periodic flood updates (first cycle runs immediately)
    scheduler::spawn(state.clone());

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub zones: Arc<Vec<StructuralZone>>,
    pub weather: WeatherClient,
    pub river: RiverClient,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        // Persisted per-district states + footprints
        .route("/api/v1/risk/states", get(handlers::states::list))
        .route("/api/v1/risk/states/:district_id", get(handlers::states::get))
        .route(
            "/api/v1/risk/states/:district_id/flooded",
            post(handlers::states::mark_flooded),
        )
        .route(
            "/api/v1/risk/geometry/:district_id",
            get(handlers::states::geometry),
        )
        // Point-in-footprint query against persisted states
        .route(
            "/api/v1/risk/check-location",
            post(handlers::location_risk::check),
        )
        // Live on-demand assessment at a searched coordinate
        .route("/api/v1/safety/check", post(handlers::user_safety::check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
