//! Weather lookup backed by the Open-Meteo geocoding and forecast APIs
//!
//! Neither endpoint requires an API key. A destination is geocoded first and
//! its forecast is then condensed into a [`WeatherSummary`].

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::http::fetch_json;
use super::{ProviderResult, WeatherLookup};
use crate::config::WeatherProviderConfig;
use crate::error::ProviderError;
use crate::models::{TemperatureRange, WeatherSummary};

/// Open-Meteo weather client
pub struct OpenMeteoWeatherClient {
    client: ClientWithMiddleware,
    config: WeatherProviderConfig,
}

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

/// Forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentData>,
    pub hourly: Option<HourlyData>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "weathercode")]
    pub weather_code: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyData {
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<Vec<Option<f32>>>,
    pub precipitation_probability: Option<Vec<Option<u8>>>,
}

/// Convert `OpenMeteo` weather code to human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

impl ForecastResponse {
    /// Condense the forecast into a summary for the named location
    pub fn summarize(&self, location: &str) -> ProviderResult<WeatherSummary> {
        let conditions = self
            .current
            .as_ref()
            .and_then(|current| current.weather_code)
            .map_or("Unknown", weather_code_to_description);

        let hourly = self.hourly.as_ref();

        let temperatures: Vec<f32> = hourly
            .and_then(|hourly| hourly.temperature.as_ref())
            .map(|temps| temps.iter().flatten().copied().collect())
            .unwrap_or_default();

        let min = temperatures.iter().copied().reduce(f32::min);
        let max = temperatures.iter().copied().reduce(f32::max);
        let (Some(min), Some(max)) = (min, max) else {
            return Err(ProviderError::Parse(format!(
                "Forecast for {location} contained no temperatures"
            )));
        };

        let precipitation_chance = hourly
            .and_then(|hourly| hourly.precipitation_probability.as_ref())
            .and_then(|chances| chances.iter().flatten().copied().max())
            .unwrap_or(0);

        Ok(WeatherSummary {
            location: location.to_string(),
            conditions: conditions.to_string(),
            temperature: TemperatureRange { min, max },
            precipitation_chance,
        })
    }
}

impl OpenMeteoWeatherClient {
    /// Create a new client
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: WeatherProviderConfig) -> Self {
        Self { client, config }
    }

    /// Resolve a place name to its best geocoding match
    async fn geocode(&self, location: &str) -> ProviderResult<GeocodingResult> {
        let url = format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.config.geocoding_url,
            urlencoding::encode(location)
        );
        debug!("Geocoding request URL: {}", url);

        let response: GeocodingResponse = fetch_json(self.client.get(url)).await?;

        response
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::NotFound(format!("Location '{location}' not found")))
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteoWeatherClient {
    #[instrument(name = "weather_lookup", skip(self))]
    async fn forecast(&self, location: &str) -> ProviderResult<WeatherSummary> {
        let place = self.geocode(location).await?;
        debug!(
            "Found location: {} ({:.4}, {:.4})",
            place.name, place.latitude, place.longitude
        );

        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current=weathercode&hourly=temperature_2m,precipitation_probability&timezone=auto&forecast_days={}",
            self.config.forecast_url, place.latitude, place.longitude, self.config.forecast_days
        );
        debug!("Forecast request URL: {}", url);

        let response: ForecastResponse = fetch_json(self.client.get(url)).await?;
        let summary = response.summarize(&place.name)?;

        info!(
            "Weather for {}: {}, {}",
            summary.location,
            summary.conditions,
            summary.format_temperature()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(3, "Overcast")]
    #[case(95, "Thunderstorm")]
    #[case(42, "Unknown")]
    fn test_weather_code_descriptions(#[case] code: u8, #[case] expected: &str) {
        assert_eq!(weather_code_to_description(code), expected);
    }

    #[test]
    fn test_forecast_summary() {
        let json = r#"{
            "current": {"time": "2025-07-13T12:00", "weathercode": 0},
            "hourly": {
                "time": ["2025-07-13T00:00", "2025-07-13T01:00", "2025-07-13T02:00"],
                "temperature_2m": [21.5, null, 28.25],
                "precipitation_probability": [5, 20, null]
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        let summary = response.summarize("Manhattan").unwrap();

        assert_eq!(summary.location, "Manhattan");
        assert_eq!(summary.conditions, "Clear sky");
        assert_eq!(summary.temperature.min, 21.5);
        assert_eq!(summary.temperature.max, 28.25);
        assert_eq!(summary.precipitation_chance, 20);
    }

    #[test]
    fn test_forecast_without_temperatures_fails() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"current": {"weathercode": 3}}"#).unwrap();
        assert!(matches!(
            response.summarize("Nowhere"),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn test_geocoding_response_without_results() {
        let response: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(response.results.is_none());
    }
}
