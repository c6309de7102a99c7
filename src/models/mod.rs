//! Data models for the trip planner
//!
//! This module contains the records that flow through the planning pipeline,
//! organized by concern:
//! - Trip: the raw request, the budget split and the normalized input
//! - Flight, Lodging, Weather, Place: normalized provider results
//! - Plan: the reconciled summary and the final itinerary

pub mod flight;
pub mod lodging;
pub mod place;
pub mod plan;
pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use flight::FlightOption;
pub use lodging::LodgingOption;
pub use place::PlaceResult;
pub use plan::{ItineraryEntry, PlaceInfo, TravelComponents, TripPlan, TripSummary};
pub use trip::{BudgetAllocation, NormalizedInput, TripRequest};
pub use weather::{TemperatureRange, WeatherSummary};
