use anyhow::Context;
use tracing::info;

use tripplanner::config::TripPlannerConfig;
use tripplanner::{TripPlanner, VERSION, telemetry, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TripPlannerConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging);
    info!(version = VERSION, "Starting trip planner");

    let planner = TripPlanner::from_config(&config)?;
    web::run(&config.server, planner).await
}
