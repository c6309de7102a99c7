//! Flight search backed by the Booking.com RapidAPI endpoint

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::http::{fetch_json, require_key};
use super::{FlightQuery, FlightSearch, ProviderResult, rank_flights};
use crate::config::FlightProviderConfig;
use crate::models::FlightOption;

/// Booking.com one-way flight search client
pub struct BookingFlightClient {
    client: ClientWithMiddleware,
    config: FlightProviderConfig,
}

/// Booking.com search response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub data: Option<SearchData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    #[serde(default)]
    pub flight_offers: Vec<FlightOffer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    #[serde(default)]
    pub segments: Vec<Segment>,
    pub price_breakdown: Option<PriceBreakdown>,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    /// Segment travel time in seconds
    pub total_time: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    #[serde(default)]
    pub carriers_data: Vec<Carrier>,
}

#[derive(Debug, Deserialize)]
pub struct Carrier {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriceBreakdown {
    pub total: Option<Money>,
}

#[derive(Debug, Deserialize)]
pub struct Money {
    pub units: Option<f64>,
    pub nanos: Option<f64>,
}

impl Money {
    fn amount(&self) -> f64 {
        self.units.unwrap_or(0.0) + self.nanos.unwrap_or(0.0) / 1e9
    }
}

impl FlightOffer {
    /// Convert an offer into a flight option priced per traveler.
    ///
    /// Offers without segments carry no schedule and are skipped.
    pub fn to_flight_option(&self, travelers: u32) -> Option<FlightOption> {
        let first = self.segments.first()?;
        let last = self.segments.last()?;

        let airline = first
            .legs
            .first()
            .and_then(|leg| leg.carriers_data.first())
            .and_then(|carrier| carrier.name.clone())
            .unwrap_or_else(|| "Unknown Airline".to_string());

        let total = self
            .price_breakdown
            .as_ref()
            .and_then(|breakdown| breakdown.total.as_ref())
            .map_or(0.0, Money::amount);
        let per_traveler = total / f64::from(travelers.max(1));

        Some(FlightOption {
            airline,
            price: (per_traveler * 100.0).round() / 100.0,
            departure_time: first.departure_time.clone().unwrap_or_default(),
            arrival_time: last.arrival_time.clone().unwrap_or_default(),
            duration: FlightOption::format_duration(first.total_time.unwrap_or(0)),
            stops: u32::try_from(first.legs.len().saturating_sub(1)).unwrap_or(u32::MAX),
            booking_token: self.token.clone(),
        })
    }
}

impl SearchResponse {
    /// All offers mapped to flight options, unfiltered and in provider order
    #[must_use]
    pub fn into_flight_options(self, travelers: u32) -> Vec<FlightOption> {
        self.data
            .map(|data| data.flight_offers)
            .unwrap_or_default()
            .iter()
            .filter_map(|offer| offer.to_flight_option(travelers))
            .collect()
    }
}

impl BookingFlightClient {
    /// Create a new client
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: FlightProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl FlightSearch for BookingFlightClient {
    #[instrument(name = "flight_search", skip(self), fields(origin = %query.origin, destination = %query.destination))]
    async fn search_flights(&self, query: &FlightQuery) -> ProviderResult<Vec<FlightOption>> {
        let api_key = require_key(self.config.api_key.as_deref(), "flight search")?;

        let url = format!(
            "{}/flights/v2/search-oneway?departId={}&arrivalId={}&departDate={}",
            self.config.base_url,
            urlencoding::encode(&query.origin),
            urlencoding::encode(&query.destination),
            query.date.format("%Y-%m-%d"),
        );
        debug!("Flight search request URL: {}", url);

        let response: SearchResponse = fetch_json(
            self.client
                .get(url)
                .header("x-rapidapi-key", api_key)
                .header("x-rapidapi-host", &self.config.host),
        )
        .await?;

        let options = response.into_flight_options(query.travelers);
        debug!("Received {} flight offers", options.len());

        let flights = rank_flights(options, query.max_stops, query.budget_per_traveler)?;
        info!(
            "Found {} flights, cheapest at ${:.2} per traveler",
            flights.len(),
            flights[0].price
        );
        Ok(flights)
    }
}
