//! HubSpot integration endpoints.
//!
//! Thin HTTP wrappers around [`HubSpotConnector`]. Request bodies are HTML
//! form-encoded, matching what the front end posts.
//!
//! ```text
//! POST /integrations/hubspot/authorize       (user_id, org_id)  -> auth URL
//! GET  /integrations/hubspot/oauth2callback  (code, state)      -> close-window page
//! POST /integrations/hubspot/credentials     (user_id, org_id)  -> token response
//! POST /integrations/hubspot/load            (credentials)      -> [IntegrationItem]
//! ```

use crate::connectors::HubSpotConnector;
use crate::error::ConnectorError;
use crate::item::IntegrationItem;
use crate::oauth::OAuthCallback;
use axum::{
    extract::{Query, State},
    response::{Html, Json},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Form body identifying the tenant and user
#[derive(Deserialize)]
pub struct UserForm {
    pub user_id: String,
    pub org_id: String,
}

/// Form body carrying serialized credentials
#[derive(Deserialize)]
pub struct CredentialsForm {
    pub credentials: String,
}

/// Create HubSpot router
pub fn create_hubspot_router(connector: Arc<HubSpotConnector>) -> Router {
    Router::new()
        .route("/integrations/hubspot/authorize", post(authorize))
        .route("/integrations/hubspot/oauth2callback", get(oauth2callback))
        .route("/integrations/hubspot/credentials", post(credentials))
        .route("/integrations/hubspot/load", post(load_items))
        .with_state(connector)
}

/// POST /integrations/hubspot/authorize
async fn authorize(
    State(connector): State<Arc<HubSpotConnector>>,
    Form(form): Form<UserForm>,
) -> Result<Json<String>, ConnectorError> {
    debug!(org_id = %form.org_id, user_id = %form.user_id, "HubSpot authorize requested");
    let url = connector
        .authorize(&form.user_id, &form.org_id)
        .await
        .inspect_err(log_failure)?;
    Ok(Json(url))
}

/// GET /integrations/hubspot/oauth2callback
async fn oauth2callback(
    State(connector): State<Arc<HubSpotConnector>>,
    Query(callback): Query<OAuthCallback>,
) -> Result<Html<&'static str>, ConnectorError> {
    debug!("HubSpot OAuth callback received");
    let page = connector
        .oauth2callback(callback)
        .await
        .inspect_err(log_failure)?;
    Ok(Html(page))
}

/// POST /integrations/hubspot/credentials
async fn credentials(
    State(connector): State<Arc<HubSpotConnector>>,
    Form(form): Form<UserForm>,
) -> Result<Json<Value>, ConnectorError> {
    let credentials = connector
        .get_credentials(&form.user_id, &form.org_id)
        .await
        .inspect_err(log_failure)?;
    Ok(Json(credentials))
}

/// POST /integrations/hubspot/load
async fn load_items(
    State(connector): State<Arc<HubSpotConnector>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Json<Vec<IntegrationItem>>, ConnectorError> {
    let items = connector
        .get_items(&form.credentials)
        .await
        .inspect_err(log_failure)?;
    Ok(Json(items))
}

fn log_failure(err: &ConnectorError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %err, "HubSpot request failed");
    } else {
        warn!(status = status.as_u16(), error = %err, "HubSpot request rejected");
    }
}
