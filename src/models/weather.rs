//! Weather summary model

use serde::{Deserialize, Serialize};

/// Temperature range in Celsius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f32,
    pub max: f32,
}

/// Short forecast for the destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    /// Resolved location name
    pub location: String,
    /// Human-readable description of the conditions (e.g. "Clear sky")
    pub conditions: String,
    pub temperature: TemperatureRange,
    /// Highest precipitation probability in the forecast window (0-100%)
    pub precipitation_chance: u8,
}

impl WeatherSummary {
    /// Format temperature range with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!(
            "{:.1}°C to {:.1}°C",
            self.temperature.min, self.temperature.max
        )
    }
}
