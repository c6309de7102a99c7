//! Flight option model

use serde::{Deserialize, Serialize};

/// One bookable one-way flight offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOption {
    pub airline: String,
    /// Price per traveler in USD
    pub price: f64,
    /// Local departure time as reported by the provider
    pub departure_time: String,
    /// Local arrival time as reported by the provider
    pub arrival_time: String,
    /// Total travel time, e.g. "5h 30m"
    pub duration: String,
    pub stops: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_token: Option<String>,
}

impl FlightOption {
    /// Render a duration in seconds as "{h}h {m}m"
    #[must_use]
    pub fn format_duration(total_seconds: u64) -> String {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        format!("{hours}h {minutes}m")
    }
}
