//! Database module - PostgreSQL connection and migrations

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run database migrations and seed reference data
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create tables if not exist
    sqlx::query(SCHEMA_SQL).execute(pool).await?;

    // Reference rows are idempotent - existing rows are left alone
    sqlx::query(SEED_SQL).execute(pool).await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Monitored districts (sampling centers for the scheduled update job)
CREATE TABLE IF NOT EXISTS districts (
    id VARCHAR(64) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    center_lat DOUBLE PRECISION NOT NULL,
    center_lng DOUBLE PRECISION NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true
);

-- Structural flood-prone bias (historical/post-event data, changes rarely)
CREATE TABLE IF NOT EXISTS structural_zones (
    district_id VARCHAR(64) PRIMARY KEY REFERENCES districts(id) ON DELETE CASCADE,
    risk_multiplier DOUBLE PRECISION NOT NULL,
    reason TEXT NOT NULL DEFAULT ''
);

-- One row per district, replaced on every tick
CREATE TABLE IF NOT EXISTS risk_states (
    district_id VARCHAR(64) PRIMARY KEY REFERENCES districts(id) ON DELETE CASCADE,
    center_lat DOUBLE PRECISION NOT NULL,
    center_lng DOUBLE PRECISION NOT NULL,
    severity DOUBLE PRECISION NOT NULL,
    risk_level VARCHAR(10) NOT NULL,
    radius_km DOUBLE PRECISION NOT NULL,
    confidence DOUBLE PRECISION NOT NULL,
    predicted_risk VARCHAR(10),
    predicted_radius_km DOUBLE PRECISION,
    prediction_window_hours INT,
    prediction_expires_at TIMESTAMPTZ,
    last_flooded_at TIMESTAMPTZ,
    updated_at TIMESTAMPTZ NOT NULL
);

-- Display footprint per district (polygon + coarse bounding box)
CREATE TABLE IF NOT EXISTS flood_geometry (
    district_id VARCHAR(64) PRIMARY KEY REFERENCES districts(id) ON DELETE CASCADE,
    polygon JSONB NOT NULL,
    bbox JSONB NOT NULL,
    risk_level VARCHAR(10) NOT NULL,
    confidence DOUBLE PRECISION NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_districts_active ON districts(is_active);
CREATE INDEX IF NOT EXISTS idx_risk_states_updated ON risk_states(updated_at);
"#;

/// Seed SQL - monitored districts and the static structural zone table
const SEED_SQL: &str = r#"
INSERT INTO districts (id, name, center_lat, center_lng) VALUES
    ('chennai',   'Chennai',   13.0827, 80.2707),
    ('mumbai',    'Mumbai',    19.0760, 72.8777),
    ('kolkata',   'Kolkata',   22.5726, 88.3639),
    ('bangalore', 'Bangalore', 12.9716, 77.5946),
    ('kochi',     'Kochi',      9.9312, 76.2673),
    ('delhi',     'Delhi',     28.7041, 77.1025)
ON CONFLICT (id) DO NOTHING;

INSERT INTO structural_zones (district_id, risk_multiplier, reason) VALUES
    ('chennai', 1.25, 'Low elevation + past urban flooding'),
    ('mumbai',  1.20, 'Coastal flooding + drainage overload'),
    ('kolkata', 1.15, 'Riverine + monsoon flooding')
ON CONFLICT (district_id) DO NOTHING;
"#;
