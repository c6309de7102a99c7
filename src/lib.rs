//! `TripPlanner` - flight, lodging, weather and place data merged into one itinerary
//!
//! This library provides the planning pipeline, the provider contracts with
//! their HTTP adapters, and the JSON API that serves plans.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use config::TripPlannerConfig;
pub use error::{ProviderError, ProviderKind, Stage, TripPlanError};
pub use models::{NormalizedInput, TravelComponents, TripPlan, TripRequest};
pub use pipeline::TripPlanner;
pub use providers::{FlightSearch, LodgingSearch, PlaceLookup, ProviderSet, WeatherLookup};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
