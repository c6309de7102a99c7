//! Aggregation stage
//!
//! Queries the four providers concurrently and reconciles their results into
//! a single [`TripSummary`]. The first provider failure fails the whole stage
//! and any results already gathered are dropped.

use tracing::{debug, info, instrument, warn};

use crate::error::{ProviderError, ProviderKind};
use crate::models::{
    BudgetAllocation, FlightOption, LodgingOption, NormalizedInput, TravelComponents, TripSummary,
};
use crate::providers::{FlightQuery, LodgingQuery, PlaceQuery, ProviderSet};
use crate::{Result, TripPlanError};

fn attribute(provider: ProviderKind) -> impl FnOnce(ProviderError) -> TripPlanError {
    move |source| {
        warn!(%provider, error = %source, "Provider query failed");
        TripPlanError::provider(provider, source)
    }
}

/// Flight criteria derived from the normalized input
#[must_use]
pub fn flight_query(input: &NormalizedInput) -> FlightQuery {
    FlightQuery {
        origin: input.origin.clone(),
        destination: input.destination.clone(),
        date: input.departure_date,
        travelers: input.travelers,
        max_stops: input.max_stops,
        budget_per_traveler: input.flight_budget_per_traveler(),
    }
}

/// Lodging criteria derived from the normalized input
#[must_use]
pub fn lodging_query(input: &NormalizedInput) -> LodgingQuery {
    LodgingQuery {
        location: input.city.clone(),
        check_in: input.departure_date,
        check_out: input.return_date,
        adults: input.travelers,
        max_price_per_night: input.max_price_per_night(),
    }
}

/// Place criteria derived from the normalized input
#[must_use]
pub fn place_query(input: &NormalizedInput) -> PlaceQuery {
    PlaceQuery {
        location: input.city.clone(),
        category: input.place_type.clone(),
    }
}

/// Query all providers concurrently and reconcile the results
#[instrument(name = "aggregate", skip_all, fields(destination = %input.city))]
pub async fn aggregate(providers: &ProviderSet, input: &NormalizedInput) -> Result<TravelComponents> {
    let flight_query = flight_query(input);
    let lodging_query = lodging_query(input);
    let place_query = place_query(input);

    debug!(
        budget_per_traveler = ?flight_query.budget_per_traveler,
        max_price_per_night = ?lodging_query.max_price_per_night,
        "Querying providers"
    );

    let (flights, lodging, weather, place) = futures::try_join!(
        async {
            providers
                .flights
                .search_flights(&flight_query)
                .await
                .map_err(attribute(ProviderKind::Flights))
        },
        async {
            providers
                .lodging
                .find_lodging(&lodging_query)
                .await
                .map_err(attribute(ProviderKind::Lodging))
        },
        async {
            providers
                .weather
                .forecast(&input.city)
                .await
                .map_err(attribute(ProviderKind::Weather))
        },
        async {
            providers
                .places
                .find_place(&place_query)
                .await
                .map_err(attribute(ProviderKind::Places))
        },
    )?;

    let summary = reconcile(input, &flights, &lodging);
    info!(
        total_cost_estimate = summary.total_cost_estimate,
        "Gathered {} flights, lodging at {}, weather {}, place {}",
        flights.len(),
        lodging.name,
        weather.conditions,
        place.name
    );

    Ok(TravelComponents {
        flights,
        lodging,
        weather,
        place,
        summary,
    })
}

/// Merge observed costs with the planned budget.
///
/// The supplied total budget is reported as the estimate even when observed
/// costs exceed it; an overrun is only logged.
#[must_use]
pub fn reconcile(
    input: &NormalizedInput,
    flights: &[FlightOption],
    lodging: &LodgingOption,
) -> TripSummary {
    let planned = input.budget_allocation;
    let accommodation_cost = lodging.stay_cost(input.nights);
    let cheapest_flight = flights.first().map(|flight| flight.price);
    let observed = cheapest_flight.unwrap_or(0.0) + accommodation_cost + planned.activities;

    let total_cost_estimate = match input.positive_budget() {
        Some(budget) => {
            if observed > budget {
                warn!(
                    budget,
                    observed, "Observed costs exceed the supplied budget"
                );
            }
            budget
        }
        None => observed,
    };

    TripSummary {
        destination: input.city.clone(),
        duration: input.duration_label(),
        total_cost_estimate,
        travelers: input.travelers,
        budget_allocation: BudgetAllocation {
            flights: cheapest_flight.unwrap_or(planned.flights),
            accommodation: accommodation_cost,
            ..planned
        },
    }
}
