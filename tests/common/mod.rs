//! In-memory providers shared by the integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

use tripplanner::config::PlanningConfig;
use tripplanner::models::{
    FlightOption, LodgingOption, PlaceResult, TemperatureRange, TripRequest, WeatherSummary,
};
use tripplanner::providers::{FlightQuery, LodgingQuery, PlaceQuery, ProviderResult};
use tripplanner::{
    FlightSearch, LodgingSearch, PlaceLookup, ProviderError, ProviderKind, ProviderSet,
    TripPlanner, WeatherLookup,
};

/// Queries received by the mock providers
#[derive(Debug, Default)]
pub struct Seen {
    pub flight: Option<FlightQuery>,
    pub lodging: Option<LodgingQuery>,
    pub weather: Option<String>,
    pub place: Option<PlaceQuery>,
}

/// One fixture answering all four provider contracts
#[derive(Clone)]
pub struct MockProviders {
    pub flights: Vec<FlightOption>,
    pub lodging: LodgingOption,
    pub weather: WeatherSummary,
    pub place: PlaceResult,
    pub failing: Option<ProviderKind>,
    /// When set, every provider waits here before answering
    pub barrier: Option<Arc<Barrier>>,
    pub seen: Arc<Mutex<Seen>>,
}

impl MockProviders {
    /// Manhattan, KS fixture: $198 flight, $215/night loft, clear weather
    pub fn manhattan() -> Self {
        Self {
            flights: vec![
                FlightOption {
                    airline: "United".to_string(),
                    price: 198.0,
                    departure_time: "2025-07-13T06:05:00".to_string(),
                    arrival_time: "2025-07-13T11:20:00".to_string(),
                    duration: "5h 15m".to_string(),
                    stops: 1,
                    booking_token: Some("d6a1f_H4sI".to_string()),
                },
                FlightOption {
                    airline: "American Airlines".to_string(),
                    price: 243.5,
                    departure_time: "2025-07-13T09:40:00".to_string(),
                    arrival_time: "2025-07-13T16:02:00".to_string(),
                    duration: "6h 22m".to_string(),
                    stops: 2,
                    booking_token: None,
                },
            ],
            lodging: LodgingOption {
                id: "50281739".to_string(),
                name: "Aggieville Loft".to_string(),
                price: 215.0,
                total_price: Some(430.0),
                address: "Manhattan, Kansas, United States".to_string(),
                rating: Some(4.91),
                bedrooms: Some(2),
                bathrooms: Some(2.0),
                beds: Some(3),
                property_type: Some("Entire loft".to_string()),
                is_superhost: Some(false),
                images: vec!["https://a0.muscache.com/im/pictures/loft.jpg".to_string()],
                url: Some("https://www.airbnb.com/rooms/50281739".to_string()),
            },
            weather: WeatherSummary {
                location: "Manhattan".to_string(),
                conditions: "Clear sky".to_string(),
                temperature: TemperatureRange { min: 19.5, max: 23.9 },
                precipitation_chance: 5,
            },
            place: PlaceResult {
                name: "Bluestem Bistro".to_string(),
                address: "1219 Moro St, Manhattan".to_string(),
                postcode: "66502".to_string(),
                email: None,
                tel: Some("(785) 537-3474".to_string()),
                website: Some("https://bluestembistro.example".to_string()),
                distance: 412.0,
            },
            failing: None,
            barrier: None,
            seen: Arc::new(Mutex::new(Seen::default())),
        }
    }

    pub fn failing(mut self, provider: ProviderKind) -> Self {
        self.failing = Some(provider);
        self
    }

    pub fn gated(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn planner(&self) -> TripPlanner {
        TripPlanner::new(
            ProviderSet::new(self.clone(), self.clone(), self.clone(), self.clone()),
            PlanningConfig::default(),
        )
    }

    async fn answer(&self, provider: ProviderKind) -> ProviderResult<()> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.failing == Some(provider) {
            return Err(ProviderError::NoResults(format!("mock {provider} has nothing")));
        }
        Ok(())
    }
}

#[async_trait]
impl FlightSearch for MockProviders {
    async fn search_flights(&self, query: &FlightQuery) -> ProviderResult<Vec<FlightOption>> {
        self.seen.lock().unwrap().flight = Some(query.clone());
        self.answer(ProviderKind::Flights).await?;
        Ok(self.flights.clone())
    }
}

#[async_trait]
impl LodgingSearch for MockProviders {
    async fn find_lodging(&self, query: &LodgingQuery) -> ProviderResult<LodgingOption> {
        self.seen.lock().unwrap().lodging = Some(query.clone());
        self.answer(ProviderKind::Lodging).await?;
        Ok(self.lodging.clone())
    }
}

#[async_trait]
impl WeatherLookup for MockProviders {
    async fn forecast(&self, location: &str) -> ProviderResult<WeatherSummary> {
        self.seen.lock().unwrap().weather = Some(location.to_string());
        self.answer(ProviderKind::Weather).await?;
        Ok(self.weather.clone())
    }
}

#[async_trait]
impl PlaceLookup for MockProviders {
    async fn find_place(&self, query: &PlaceQuery) -> ProviderResult<PlaceResult> {
        self.seen.lock().unwrap().place = Some(query.clone());
        self.answer(ProviderKind::Places).await?;
        Ok(self.place.clone())
    }
}

/// JFK to Manhattan, KS for two travelers
pub fn manhattan_request() -> TripRequest {
    TripRequest::new("JFK", "MHK", "Manhattan", "2025-07-13", "2025-07-15")
        .with_travelers(2)
        .with_max_stops(2)
}
