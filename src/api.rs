//! JSON API routes

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;

use crate::error::{ProviderKind, Stage};
use crate::models::{TripPlan, TripRequest};
use crate::{TripPlanError, TripPlanner, VERSION};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Error body returned for failed plan requests
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub stage: Option<Stage>,
    pub provider: Option<ProviderKind>,
    pub message: String,
}

/// Pipeline failure rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(TripPlanError);

impl From<TripPlanError> for ApiError {
    fn from(err: TripPlanError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(TripPlanError::validation(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            TripPlanError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TripPlanError::Provider { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Trip planning failed");
        } else {
            tracing::info!(error = %self.0, "Rejected trip request");
        }

        let body = ErrorBody {
            error: self.0.kind(),
            stage: self.0.stage(),
            provider: self.0.provider_kind(),
            message: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(planner: Arc<TripPlanner>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plan", post(plan))
        .with_state(planner)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

async fn plan(
    State(planner): State<Arc<TripPlanner>>,
    request: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<TripPlan>, ApiError> {
    let Json(request) = request?;
    let plan = planner.plan_trip(&request).await?;
    Ok(Json(plan))
}
