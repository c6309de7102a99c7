//! Trip request, budget split and the normalized planning input

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::SplitRatios;

/// Raw trip request as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Departure airport (IATA code)
    #[serde(alias = "departId")]
    pub origin: String,
    /// Arrival airport (IATA code)
    #[serde(alias = "arrivalId")]
    pub destination: String,
    /// Destination city name used for lodging, weather and places
    #[serde(alias = "location")]
    pub city: String,
    /// Departure date (YYYY-MM-DD)
    pub departure_date: String,
    /// Return date (YYYY-MM-DD)
    pub return_date: String,
    /// Number of travelers, defaults to the configured value
    #[serde(default)]
    pub travelers: Option<u32>,
    /// Maximum layover stops, defaults to the configured value
    #[serde(default)]
    pub max_stops: Option<u32>,
    /// Total trip budget in USD
    #[serde(default)]
    pub budget: Option<f64>,
    /// Place category filter (e.g. "coffee", "museum")
    #[serde(default, alias = "places")]
    pub place_type: Option<String>,
}

impl TripRequest {
    /// Create a request with only the required fields set
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        city: impl Into<String>,
        departure_date: impl Into<String>,
        return_date: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            city: city.into(),
            departure_date: departure_date.into(),
            return_date: return_date.into(),
            travelers: None,
            max_stops: None,
            budget: None,
            place_type: None,
        }
    }

    #[must_use]
    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = Some(travelers);
        self
    }

    #[must_use]
    pub fn with_max_stops(mut self, max_stops: u32) -> Self {
        self.max_stops = Some(max_stops);
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    #[must_use]
    pub fn with_place_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = Some(place_type.into());
        self
    }
}

/// Budget split across the four spending categories, in USD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub flights: f64,
    pub accommodation: f64,
    pub activities: f64,
    pub miscellaneous: f64,
}

impl BudgetAllocation {
    /// Allocation with every category at zero
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Split a total budget using the given ratios
    #[must_use]
    pub fn split(total: f64, ratios: &SplitRatios) -> Self {
        Self {
            flights: total * ratios.flights,
            accommodation: total * ratios.accommodation,
            activities: total * ratios.activities,
            miscellaneous: total * ratios.miscellaneous,
        }
    }

    /// Sum of all four categories
    #[must_use]
    pub fn total(&self) -> f64 {
        self.flights + self.accommodation + self.activities + self.miscellaneous
    }
}

/// Validated request with derived trip length and planned budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedInput {
    pub origin: String,
    pub destination: String,
    pub city: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub travelers: u32,
    pub max_stops: u32,
    /// Total budget after defaults were applied
    pub budget: Option<f64>,
    pub place_type: Option<String>,
    /// Whole days between departure and return
    pub duration_days: u32,
    /// Nights of lodging, never negative
    pub nights: u32,
    /// Planned split of the total budget
    pub budget_allocation: BudgetAllocation,
}

impl NormalizedInput {
    /// Human-readable trip length, e.g. "3 days"
    #[must_use]
    pub fn duration_label(&self) -> String {
        format!("{} days", self.duration_days)
    }

    /// Supplied total budget, if it is positive
    #[must_use]
    pub fn positive_budget(&self) -> Option<f64> {
        self.budget.filter(|budget| *budget > 0.0)
    }

    /// Nightly lodging ceiling derived from the planned accommodation budget.
    ///
    /// Returns `None` when no accommodation money was planned, meaning the
    /// lodging search runs without a price filter.
    #[must_use]
    pub fn max_price_per_night(&self) -> Option<f64> {
        let accommodation = self.budget_allocation.accommodation;
        let per_night = if self.nights > 0 {
            accommodation / f64::from(self.nights)
        } else {
            accommodation
        };
        (per_night > 0.0).then_some(per_night)
    }

    /// Per-traveler flight ceiling, present only when a total budget was given
    #[must_use]
    pub fn flight_budget_per_traveler(&self) -> Option<f64> {
        self.positive_budget()
            .map(|_| self.budget_allocation.flights / f64::from(self.travelers.max(1)))
    }
}
