//! Input normalization
//!
//! Validates a raw [`TripRequest`], fills in configured defaults, derives the
//! trip length and splits the budget. Pure computation, no I/O.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::PlanningConfig;
use crate::models::{BudgetAllocation, NormalizedInput, TripRequest};
use crate::{Result, TripPlanError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Nights of lodging for a trip lasting `duration_days`, floored at zero
#[must_use]
pub fn nights_for(duration_days: i64) -> u32 {
    u32::try_from((duration_days - 1).max(0)).unwrap_or(u32::MAX)
}

fn required(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TripPlanError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        TripPlanError::validation(format!(
            "{field} '{value}' is not a valid date (expected YYYY-MM-DD)"
        ))
    })
}

/// Validate a trip request and derive the planning input
pub fn normalize(request: &TripRequest, config: &PlanningConfig) -> Result<NormalizedInput> {
    let origin = required(&request.origin, "Origin code")?;
    let destination = required(&request.destination, "Destination code")?;
    let city = required(&request.city, "Destination city")?;

    let departure_date = parse_date(&request.departure_date, "Departure date")?;
    let return_date = parse_date(&request.return_date, "Return date")?;
    if return_date <= departure_date {
        return Err(TripPlanError::validation(format!(
            "Return date {return_date} must be after departure date {departure_date}"
        )));
    }

    let travelers = request.travelers.unwrap_or(config.default_travelers);
    if travelers == 0 {
        return Err(TripPlanError::validation("Traveler count must be at least 1"));
    }
    let max_stops = request.max_stops.unwrap_or(config.default_max_stops);

    let budget = match request.budget {
        Some(budget) if !budget.is_finite() || budget <= 0.0 => {
            return Err(TripPlanError::validation(format!(
                "Budget must be a positive amount, got {budget}"
            )));
        }
        Some(budget) => Some(budget),
        None => config
            .default_budget_per_traveler
            .map(|per_traveler| per_traveler * f64::from(travelers)),
    };

    let days = (return_date - departure_date).num_days();
    let duration_days = u32::try_from(days)
        .map_err(|_| TripPlanError::validation("Trip is too long to plan"))?;
    let nights = nights_for(days);

    let budget_allocation = budget.map_or_else(BudgetAllocation::zero, |total| {
        BudgetAllocation::split(total, &config.split)
    });

    let place_type = request
        .place_type
        .as_deref()
        .map(str::trim)
        .filter(|place_type| !place_type.is_empty())
        .map(str::to_string);

    debug!(
        duration_days,
        nights,
        travelers,
        "Normalized trip request {} -> {}",
        origin,
        destination
    );

    Ok(NormalizedInput {
        origin,
        destination,
        city,
        departure_date,
        return_date,
        travelers,
        max_stops,
        budget,
        place_type,
        duration_days,
        nights,
        budget_allocation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request() -> TripRequest {
        TripRequest::new("JFK", "MHK", "Manhattan", "2025-07-13", "2025-07-15")
    }

    #[test]
    fn test_defaults_are_applied() {
        let input = normalize(&request(), &PlanningConfig::default()).unwrap();
        assert_eq!(input.travelers, 1);
        assert_eq!(input.max_stops, 2);
        assert_eq!(input.budget, None);
        assert_eq!(input.budget_allocation, BudgetAllocation::zero());
        assert_eq!(input.duration_days, 2);
        assert_eq!(input.nights, 1);
        assert_eq!(input.duration_label(), "2 days");
    }

    #[rstest]
    #[case(3000.0)]
    #[case(1234.56)]
    #[case(0.01)]
    #[case(987_654.321)]
    fn test_budget_split_sums_to_total(#[case] budget: f64) {
        let input = normalize(&request().with_budget(budget), &PlanningConfig::default()).unwrap();
        let allocation = input.budget_allocation;
        let tolerance = 1e-9 * budget.max(1.0);
        assert!((allocation.total() - budget).abs() < tolerance);
        assert!((allocation.flights - budget * 0.4).abs() < tolerance);
        assert!((allocation.accommodation - budget * 0.3).abs() < tolerance);
        assert!((allocation.activities - budget * 0.2).abs() < tolerance);
        assert!((allocation.miscellaneous - budget * 0.1).abs() < tolerance);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(2, 1)]
    #[case(7, 6)]
    #[case(-3, 0)]
    fn test_nights_never_negative(#[case] days: i64, #[case] expected: u32) {
        assert_eq!(nights_for(days), expected);
    }

    #[rstest]
    #[case(TripRequest::new("", "MHK", "Manhattan", "2025-07-13", "2025-07-15"), "Origin code")]
    #[case(TripRequest::new("JFK", " ", "Manhattan", "2025-07-13", "2025-07-15"), "Destination code")]
    #[case(TripRequest::new("JFK", "MHK", "", "2025-07-13", "2025-07-15"), "Destination city")]
    #[case(TripRequest::new("JFK", "MHK", "Manhattan", "07/13/2025", "2025-07-15"), "Departure date")]
    #[case(TripRequest::new("JFK", "MHK", "Manhattan", "2025-07-13", "2025-02-30"), "Return date")]
    #[case(TripRequest::new("JFK", "MHK", "Manhattan", "2025-07-15", "2025-07-15"), "must be after")]
    #[case(TripRequest::new("JFK", "MHK", "Manhattan", "2025-07-15", "2025-07-13"), "must be after")]
    #[case(request().with_travelers(0), "Traveler count")]
    #[case(request().with_budget(0.0), "Budget must be a positive")]
    #[case(request().with_budget(-10.0), "Budget must be a positive")]
    fn test_malformed_requests_are_rejected(#[case] request: TripRequest, #[case] fragment: &str) {
        let err = normalize(&request, &PlanningConfig::default()).unwrap_err();
        assert!(matches!(err, TripPlanError::Validation { .. }));
        assert!(err.to_string().contains(fragment), "{err} should mention {fragment}");
    }

    #[test]
    fn test_default_budget_per_traveler_fills_missing_budget() {
        let config = PlanningConfig {
            default_budget_per_traveler: Some(1500.0),
            ..PlanningConfig::default()
        };
        let input = normalize(&request().with_travelers(2), &config).unwrap();
        assert_eq!(input.budget, Some(3000.0));
        assert!((input.budget_allocation.flights - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_blank_place_type_is_dropped() {
        let input = normalize(&request().with_place_type("  "), &PlanningConfig::default()).unwrap();
        assert!(input.place_type.is_none());

        let input = normalize(&request().with_place_type(" coffee "), &PlanningConfig::default()).unwrap();
        assert_eq!(input.place_type.as_deref(), Some("coffee"));
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let input = normalize(
            &request().with_travelers(4).with_max_stops(0).with_budget(800.0),
            &PlanningConfig::default(),
        )
        .unwrap();
        assert_eq!(input.travelers, 4);
        assert_eq!(input.max_stops, 0);
        assert_eq!(input.budget, Some(800.0));
    }
}
