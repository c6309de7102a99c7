//! Error types and handling for the trip planner

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which external data provider a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Flights,
    Lodging,
    Weather,
    Places,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Flights => "flight search",
            ProviderKind::Lodging => "lodging search",
            ProviderKind::Weather => "weather lookup",
            ProviderKind::Places => "place lookup",
        };
        f.write_str(name)
    }
}

/// Pipeline stage a failure originated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Normalize,
    Aggregate,
}

/// Failure reported by a provider adapter
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No results: {0}")]
    NoResults(String),
}

impl From<reqwest_middleware::Error> for ProviderError {
    fn from(err: reqwest_middleware::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum TripPlanError {
    /// Malformed trip request
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A provider query failed during aggregation
    #[error("{provider} failed: {source}")]
    Provider {
        provider: ProviderKind,
        #[source]
        source: ProviderError,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TripPlanError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Attribute a provider failure to its provider
    #[must_use]
    pub fn provider(provider: ProviderKind, source: ProviderError) -> Self {
        Self::Provider { provider, source }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Pipeline stage that produced this error, if any
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            TripPlanError::Validation { .. } => Some(Stage::Normalize),
            TripPlanError::Provider { .. } => Some(Stage::Aggregate),
            TripPlanError::Config { .. } => None,
        }
    }

    /// Provider that failed, if any
    #[must_use]
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        match self {
            TripPlanError::Provider { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    /// Short machine-readable error kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TripPlanError::Validation { .. } => "validation",
            TripPlanError::Provider { .. } => "provider",
            TripPlanError::Config { .. } => "config",
        }
    }

    /// Client-facing message; upstream response bodies are never included
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripPlanError::Validation { message } => format!("Invalid input: {message}"),
            TripPlanError::Provider { provider, source } => match source {
                ProviderError::NoResults(message) | ProviderError::NotFound(message) => {
                    format!("The {provider} found nothing suitable: {message}")
                }
                ProviderError::Configuration(_) => {
                    format!("The {provider} is not configured. Please check your API keys.")
                }
                _ => format!(
                    "Unable to reach the {provider}. Please check your internet connection."
                ),
            },
            TripPlanError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}
