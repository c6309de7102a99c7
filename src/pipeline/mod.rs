//! Planning pipeline
//!
//! Three stages run strictly in order:
//! - [`normalize`]: validate the raw request and derive dates and budget split
//! - [`aggregate`]: query the four providers concurrently and reconcile costs
//! - [`compile`]: assemble the final itinerary and recommendations
//!
//! A failure in any stage aborts the run and is returned unchanged.

use tracing::{info, instrument};

use crate::config::{PlanningConfig, TripPlannerConfig};
use crate::models::{TripPlan, TripRequest};
use crate::providers::ProviderSet;
use crate::{Result, TripPlanError};

pub mod aggregate;
pub mod compile;
pub mod normalize;

pub use aggregate::{aggregate, reconcile};
pub use compile::{compile, recommendations};
pub use normalize::normalize;

/// Drives a trip request through the three pipeline stages
#[derive(Clone)]
pub struct TripPlanner {
    providers: ProviderSet,
    planning: PlanningConfig,
}

impl TripPlanner {
    #[must_use]
    pub fn new(providers: ProviderSet, planning: PlanningConfig) -> Self {
        Self {
            providers,
            planning,
        }
    }

    /// Build a planner backed by the HTTP provider adapters
    pub fn from_config(config: &TripPlannerConfig) -> Result<Self> {
        let providers = ProviderSet::from_config(&config.providers)
            .map_err(|e| TripPlanError::config(format!("Failed to build providers: {e}")))?;
        Ok(Self::new(providers, config.planning.clone()))
    }

    /// Plan a trip end to end
    #[instrument(
        skip_all,
        fields(origin = %request.origin, destination = %request.destination, city = %request.city)
    )]
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan> {
        let input = normalize(request, &self.planning)?;
        info!(
            nights = input.nights,
            travelers = input.travelers,
            budget = ?input.budget,
            "Normalized trip request"
        );

        let components = aggregate(&self.providers, &input).await?;

        let plan = compile(components);
        info!(
            recommendations = plan.recommendations.len(),
            total_cost_estimate = plan.summary.total_cost_estimate,
            "Compiled trip plan"
        );
        Ok(plan)
    }
}
