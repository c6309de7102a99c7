//! Reconciled trip summary and the final itinerary

use serde::{Deserialize, Serialize};

use super::{BudgetAllocation, FlightOption, LodgingOption, PlaceResult, WeatherSummary};

/// Placeholder shown for missing place contact details
pub const NOT_AVAILABLE: &str = "N/A";

/// Per-trip totals after provider results were reconciled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub destination: String,
    /// Trip length, e.g. "2 days"
    pub duration: String,
    pub total_cost_estimate: f64,
    pub travelers: u32,
    /// Planned split with flights and accommodation replaced by observed costs
    pub budget_allocation: BudgetAllocation,
}

/// Everything gathered by the aggregation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelComponents {
    pub flights: Vec<FlightOption>,
    pub lodging: LodgingOption,
    pub weather: WeatherSummary,
    pub place: PlaceResult,
    pub summary: TripSummary,
}

/// Contact and distance details of an itinerary stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub address: String,
    pub postcode: String,
    pub email: String,
    pub tel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub distance: f64,
}

/// One stop on the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub location: String,
    pub place: String,
    pub info: PlaceInfo,
}

impl From<&PlaceResult> for ItineraryEntry {
    fn from(place: &PlaceResult) -> Self {
        Self {
            location: place.address.clone(),
            place: place.name.clone(),
            info: PlaceInfo {
                address: place.address.clone(),
                postcode: place.postcode.clone(),
                email: place
                    .email
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                tel: place
                    .tel
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                website: place.website.clone(),
                distance: place.distance,
            },
        }
    }
}

/// The final, consolidated trip plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub summary: TripSummary,
    pub transportation: Vec<FlightOption>,
    pub accommodation: LodgingOption,
    pub itinerary: Vec<ItineraryEntry>,
    pub weather_information: WeatherSummary,
    pub recommendations: Vec<String>,
}
