//! Provider contracts
//!
//! The planning pipeline talks to its four external data sources only through
//! these traits. Concrete adapters map each upstream schema onto the shared
//! records in [`crate::models`] before anything reaches the pipeline, so tests
//! can swap in in-memory implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use crate::models::{FlightOption, LodgingOption, PlaceResult, WeatherSummary};

pub mod airbnb;
pub mod booking;
pub mod foursquare;
pub mod http;
pub mod open_meteo;

pub use airbnb::AirbnbLodgingClient;
pub use booking::BookingFlightClient;
pub use foursquare::FoursquarePlaceClient;
pub use open_meteo::OpenMeteoWeatherClient;

/// Result type returned by provider adapters
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Criteria for a one-way flight search
#[derive(Debug, Clone, PartialEq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub travelers: u32,
    pub max_stops: u32,
    /// Maximum price per traveler in USD
    pub budget_per_traveler: Option<f64>,
}

/// Criteria for a lodging search
#[derive(Debug, Clone, PartialEq)]
pub struct LodgingQuery {
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    /// Maximum nightly price in USD
    pub max_price_per_night: Option<f64>,
}

/// Criteria for a point-of-interest lookup
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub location: String,
    /// Category such as "coffee" or "museum"
    pub category: Option<String>,
}

#[async_trait]
pub trait FlightSearch: Send + Sync {
    /// Flights ordered by ascending per-traveler price
    async fn search_flights(&self, query: &FlightQuery) -> ProviderResult<Vec<FlightOption>>;
}

#[async_trait]
pub trait LodgingSearch: Send + Sync {
    /// The single best lodging candidate under the nightly ceiling
    async fn find_lodging(&self, query: &LodgingQuery) -> ProviderResult<LodgingOption>;
}

#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn forecast(&self, location: &str) -> ProviderResult<WeatherSummary>;
}

#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// The nearest (first) place matching the query
    async fn find_place(&self, query: &PlaceQuery) -> ProviderResult<PlaceResult>;
}

/// The four providers the aggregation stage queries
#[derive(Clone)]
pub struct ProviderSet {
    pub flights: Arc<dyn FlightSearch>,
    pub lodging: Arc<dyn LodgingSearch>,
    pub weather: Arc<dyn WeatherLookup>,
    pub places: Arc<dyn PlaceLookup>,
}

impl ProviderSet {
    /// Bundle four provider implementations
    pub fn new(
        flights: impl FlightSearch + 'static,
        lodging: impl LodgingSearch + 'static,
        weather: impl WeatherLookup + 'static,
        places: impl PlaceLookup + 'static,
    ) -> Self {
        Self {
            flights: Arc::new(flights),
            lodging: Arc::new(lodging),
            weather: Arc::new(weather),
            places: Arc::new(places),
        }
    }

    /// Build the HTTP adapters sharing one retrying client
    pub fn from_config(config: &ProvidersConfig) -> ProviderResult<Self> {
        let client = http::build_client(config)?;
        Ok(Self::new(
            BookingFlightClient::new(client.clone(), config.flights.clone()),
            AirbnbLodgingClient::new(client.clone(), config.lodging.clone()),
            OpenMeteoWeatherClient::new(client.clone(), config.weather.clone()),
            FoursquarePlaceClient::new(client, config.places.clone()),
        ))
    }
}

/// Keep flights within the stop and budget limits, cheapest first
pub fn rank_flights(
    flights: Vec<FlightOption>,
    max_stops: u32,
    budget_per_traveler: Option<f64>,
) -> ProviderResult<Vec<FlightOption>> {
    let mut flights: Vec<FlightOption> = flights
        .into_iter()
        .filter(|flight| flight.stops <= max_stops)
        .filter(|flight| budget_per_traveler.is_none_or(|budget| flight.price <= budget))
        .collect();

    // stable sort keeps provider order among equal prices
    flights.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));

    if flights.is_empty() {
        return Err(ProviderError::NoResults(
            "No flights found matching your criteria.".to_string(),
        ));
    }
    Ok(flights)
}

/// Pick the highest-rated candidate at or under the nightly ceiling.
///
/// Missing ratings count as zero; ties keep the first candidate seen.
pub fn select_best_lodging(
    candidates: Vec<LodgingOption>,
    max_price_per_night: Option<f64>,
) -> ProviderResult<LodgingOption> {
    let mut best: Option<LodgingOption> = None;

    for candidate in candidates {
        if max_price_per_night.is_some_and(|ceiling| candidate.price > ceiling) {
            continue;
        }
        let better = match &best {
            Some(current) => candidate.rating.unwrap_or(0.0) > current.rating.unwrap_or(0.0),
            None => true,
        };
        if better {
            best = Some(candidate);
        }
    }

    best.ok_or_else(|| match max_price_per_night {
        Some(ceiling) => {
            ProviderError::NoResults(format!("No lodging found under ${ceiling:.2} per night"))
        }
        None => ProviderError::NoResults("No lodging found".to_string()),
    })
}
