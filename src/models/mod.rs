//! Persistence models
//!
//! Row types and queries for the state store. Timestamp encoding is
//! normalized here, at the boundary - the engine only ever sees
//! `DateTime<Utc>`.

pub mod district;
pub mod geometry;
pub mod risk_state;
pub mod zone;

pub use district::District;
pub use geometry::FloodGeometry;
pub use risk_state::RiskStateRecord;
