// HTTP routing for integration endpoints

pub mod hubspot;

pub use hubspot::create_hubspot_router;

use crate::connectors::HubSpotConnector;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Build the full application router.
///
/// CORS is permissive: the front end that opens the OAuth popup is served
/// from a different origin.
pub fn create_router(hubspot: Arc<HubSpotConnector>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(create_hubspot_router(hubspot))
        .layer(CorsLayer::permissive())
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
