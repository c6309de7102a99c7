use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api;
use crate::config::ServerConfig;
use crate::pipeline::TripPlanner;

/// Application router with middleware applied
pub fn app(config: &ServerConfig, planner: TripPlanner) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(Arc::new(planner)))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(cors)
}

pub async fn run(config: &ServerConfig, planner: TripPlanner) -> anyhow::Result<()> {
    let app = app(config, planner);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.port);
    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}
