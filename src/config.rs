//! Configuration management for the trip planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripPlanError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Tolerance used when checking that split ratios add up to one
const RATIO_TOLERANCE: f64 = 1e-9;

/// Root configuration structure for the trip planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripPlannerConfig {
    /// Planning defaults and budget split
    #[serde(default)]
    pub planning: PlanningConfig,
    /// Provider adapter settings
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Fixed shares of the total budget per spending category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatios {
    #[serde(default = "default_flights_ratio")]
    pub flights: f64,
    #[serde(default = "default_accommodation_ratio")]
    pub accommodation: f64,
    #[serde(default = "default_activities_ratio")]
    pub activities: f64,
    #[serde(default = "default_miscellaneous_ratio")]
    pub miscellaneous: f64,
}

/// Planning defaults applied by the input normalizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Budget split ratios
    #[serde(default)]
    pub split: SplitRatios,
    /// Traveler count when the request omits it
    #[serde(default = "default_travelers")]
    pub default_travelers: u32,
    /// Maximum layover stops when the request omits it
    #[serde(default = "default_max_stops")]
    pub default_max_stops: u32,
    /// Budget per traveler used when the request has no total budget
    #[serde(default)]
    pub default_budget_per_traveler: Option<f64>,
}

/// Settings shared by all provider adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_provider_max_retries")]
    pub max_retries: u32,
    #[serde(default)]
    pub flights: FlightProviderConfig,
    #[serde(default)]
    pub lodging: LodgingProviderConfig,
    #[serde(default)]
    pub weather: WeatherProviderConfig,
    #[serde(default)]
    pub places: PlacesProviderConfig,
}

/// Booking.com flight search via RapidAPI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightProviderConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_flights_base_url")]
    pub base_url: String,
    #[serde(default = "default_flights_host")]
    pub host: String,
}

/// Airbnb lodging search via RapidAPI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LodgingProviderConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_lodging_base_url")]
    pub base_url: String,
    #[serde(default = "default_lodging_host")]
    pub host: String,
}

/// Open-Meteo geocoding and forecast (no API key required)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherProviderConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Number of forecast days summarized
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

/// Foursquare Places search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesProviderConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    #[serde(default = "default_places_api_version")]
    pub api_version: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

// Default value functions
fn default_flights_ratio() -> f64 {
    0.4
}

fn default_accommodation_ratio() -> f64 {
    0.3
}

fn default_activities_ratio() -> f64 {
    0.2
}

fn default_miscellaneous_ratio() -> f64 {
    0.1
}

fn default_travelers() -> u32 {
    1
}

fn default_max_stops() -> u32 {
    2
}

fn default_provider_timeout() -> u32 {
    30
}

fn default_provider_max_retries() -> u32 {
    3
}

fn default_flights_base_url() -> String {
    "https://booking-com18.p.rapidapi.com".to_string()
}

fn default_flights_host() -> String {
    "booking-com18.p.rapidapi.com".to_string()
}

fn default_lodging_base_url() -> String {
    "https://airbnb13.p.rapidapi.com".to_string()
}

fn default_lodging_host() -> String {
    "airbnb13.p.rapidapi.com".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_forecast_days() -> u8 {
    7
}

fn default_places_base_url() -> String {
    "https://places-api.foursquare.com".to_string()
}

fn default_places_api_version() -> String {
    "2025-06-17".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            flights: default_flights_ratio(),
            accommodation: default_accommodation_ratio(),
            activities: default_activities_ratio(),
            miscellaneous: default_miscellaneous_ratio(),
        }
    }
}

impl SplitRatios {
    /// Sum of all ratios
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.flights + self.accommodation + self.activities + self.miscellaneous
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            split: SplitRatios::default(),
            default_travelers: default_travelers(),
            default_max_stops: default_max_stops(),
            default_budget_per_traveler: None,
        }
    }
}

impl Default for FlightProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_flights_base_url(),
            host: default_flights_host(),
        }
    }
}

impl Default for LodgingProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_lodging_base_url(),
            host: default_lodging_host(),
        }
    }
}

impl Default for WeatherProviderConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for PlacesProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            api_version: default_places_api_version(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_provider_timeout(),
            max_retries: default_provider_max_retries(),
            flights: FlightProviderConfig::default(),
            lodging: LodgingProviderConfig::default(),
            weather: WeatherProviderConfig::default(),
            places: PlacesProviderConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl TripPlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRIPPLANNER_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.apply_key_fallbacks();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripplanner").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.planning.default_travelers == 0 {
            self.planning.default_travelers = default_travelers();
        }
        if self.providers.timeout_seconds == 0 {
            self.providers.timeout_seconds = default_provider_timeout();
        }
        if self.providers.flights.base_url.is_empty() {
            self.providers.flights.base_url = default_flights_base_url();
        }
        if self.providers.lodging.base_url.is_empty() {
            self.providers.lodging.base_url = default_lodging_base_url();
        }
        if self.providers.places.base_url.is_empty() {
            self.providers.places.base_url = default_places_base_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
    }

    /// Fill missing provider keys from the conventional environment variables
    pub fn apply_key_fallbacks(&mut self) {
        fn fallback(slot: &mut Option<String>, var: &str) {
            if slot.is_none() {
                *slot = env::var(var).ok().filter(|key| !key.is_empty());
            }
        }

        fallback(&mut self.providers.flights.api_key, "RAPID_API_FLIGHT");
        fallback(&mut self.providers.lodging.api_key, "RAPID_API_HOTEL");
        fallback(&mut self.providers.places.api_key, "FOURSQUARE_API_KEY");
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_split()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the budget split ratios
    fn validate_split(&self) -> Result<()> {
        let split = &self.planning.split;
        let ratios = [
            split.flights,
            split.accommodation,
            split.activities,
            split.miscellaneous,
        ];

        if ratios.iter().any(|ratio| !ratio.is_finite() || *ratio < 0.0) {
            return Err(TripPlanError::config("Budget split ratios must be non-negative numbers").into());
        }

        if (split.sum() - 1.0).abs() > RATIO_TOLERANCE {
            return Err(TripPlanError::config(format!(
                "Budget split ratios must sum to 1, got {}",
                split.sum()
            ))
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.providers.timeout_seconds > 300 {
            return Err(TripPlanError::config(
                "Provider timeout cannot exceed 300 seconds"
            ).into());
        }

        if self.providers.max_retries > 10 {
            return Err(TripPlanError::config(
                "Provider max retries cannot exceed 10"
            ).into());
        }

        if self.providers.weather.forecast_days == 0 || self.providers.weather.forecast_days > 16 {
            return Err(TripPlanError::config(
                "Weather forecast days must be between 1 and 16"
            ).into());
        }

        if let Some(per_traveler) = self.planning.default_budget_per_traveler {
            if !per_traveler.is_finite() || per_traveler <= 0.0 {
                return Err(TripPlanError::config(
                    "Default budget per traveler must be a positive amount"
                ).into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripPlanError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripPlanError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        let urls = [
            ("flights", &self.providers.flights.base_url),
            ("lodging", &self.providers.lodging.base_url),
            ("places", &self.providers.places.base_url),
            ("geocoding", &self.providers.weather.geocoding_url),
            ("forecast", &self.providers.weather.forecast_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripPlanError::config(format!(
                    "The {name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
