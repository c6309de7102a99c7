//! Plan compilation
//!
//! Turns the aggregated components into the final [`TripPlan`]. Pure and
//! infallible.

use crate::models::{ItineraryEntry, LodgingOption, TravelComponents, TripPlan, TripSummary, WeatherSummary};

/// Assemble the final plan from aggregated components
#[must_use]
pub fn compile(components: TravelComponents) -> TripPlan {
    let TravelComponents {
        flights,
        lodging,
        weather,
        place,
        summary,
    } = components;

    let recommendations = recommendations(&summary, &weather, &lodging);
    let itinerary = vec![ItineraryEntry::from(&place)];

    TripPlan {
        summary,
        transportation: flights,
        accommodation: lodging,
        itinerary,
        weather_information: weather,
        recommendations,
    }
}

/// Ordered free-text recommendations; lines without data are omitted
#[must_use]
pub fn recommendations(
    summary: &TripSummary,
    weather: &WeatherSummary,
    lodging: &LodgingOption,
) -> Vec<String> {
    let stay = if lodging.superhost() {
        format!("You're staying with a Superhost at {}!", lodging.name)
    } else {
        format!("Your accommodation: {}", lodging.name)
    };

    let rooms = match (lodging.bedrooms, lodging.bathrooms) {
        (Some(bedrooms), Some(bathrooms)) if bedrooms > 0 && bathrooms > 0.0 => format!(
            "The property has {bedrooms} bedroom(s) and {bathrooms} bathroom(s)."
        ),
        _ => String::new(),
    };

    [
        format!("Don't forget to try local food in {}.", summary.destination),
        format!("Pack according to weather: {}", weather.conditions),
        stay,
        rooms,
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect()
}
