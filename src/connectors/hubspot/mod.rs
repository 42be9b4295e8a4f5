pub mod api;
pub mod config;
pub mod metadata;
pub mod transformer;

use anyhow::Context;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use self::api::HubSpotClient;
use self::config::HubSpotConfig;
use self::transformer::contact_to_item;
use crate::error::ConnectorError;
use crate::item::IntegrationItem;
use crate::oauth::{exchange_code_for_token, OAuthCallback, OAuthState, TRANSIENT_TTL_SECONDS};
use crate::store::{store_key, TransientStore};

pub use self::metadata::{create_integration_item_metadata, TokenMetadata};

/// Provider prefix for store keys
pub const PROVIDER: &str = "hubspot";

/// Page returned to the OAuth popup; closing it signals completion to the opener.
pub const CLOSE_WINDOW_HTML: &str = r#"<html>
    <script>
        window.close();
    </script>
</html>
"#;

/// HubSpot connector: OAuth authorization-code flow plus contact import.
///
/// Holds only immutable configuration; pending state and issued credentials
/// live in the injected [`TransientStore`] under
/// `hubspot_state:{org_id}:{user_id}` and `hubspot_credentials:{org_id}:{user_id}`.
pub struct HubSpotConnector {
    config: HubSpotConfig,
    store: Arc<dyn TransientStore>,
    http_client: Client,
}

impl HubSpotConnector {
    pub fn new(config: HubSpotConfig, store: Arc<dyn TransientStore>) -> Self {
        Self {
            config,
            store,
            http_client: Client::new(),
        }
    }

    /// Start an authorization attempt for `(org_id, user_id)`.
    ///
    /// Stores a fresh [`OAuthState`] for 600 seconds and returns the HubSpot
    /// authorization URL carrying it. A new attempt replaces any pending one.
    pub async fn authorize(&self, user_id: &str, org_id: &str) -> Result<String, ConnectorError> {
        let state = OAuthState::new(user_id, org_id);
        let encoded_state = state.encode().context("Failed to serialize OAuth state")?;

        self.store
            .set_with_ttl(
                &state_key(org_id, user_id),
                &encoded_state,
                TRANSIENT_TTL_SECONDS,
            )
            .await?;

        info!(org_id = %org_id, user_id = %user_id, "HubSpot authorization started");

        Ok(self.config.oauth_config().build_auth_url(&encoded_state))
    }

    /// Handle the provider redirect.
    ///
    /// Validates the returned state against the stored one, then exchanges the
    /// code for a token while deleting the pending state. The raw token
    /// response is stored for 600 seconds. Returns the popup-closing page.
    pub async fn oauth2callback(
        &self,
        callback: OAuthCallback,
    ) -> Result<&'static str, ConnectorError> {
        if let Some(error) = callback.error {
            warn!(
                error = %error,
                description = callback.error_description.as_deref().unwrap_or(""),
                "HubSpot authorization failed"
            );
            return Err(ConnectorError::Provider(error));
        }

        let supplied = callback
            .state
            .as_deref()
            .and_then(|s| OAuthState::decode(s).ok())
            .ok_or_else(|| {
                warn!("Missing or malformed OAuth state");
                ConnectorError::StateMismatch
            })?;

        let (org_id, user_id) = (supplied.org_id.as_str(), supplied.user_id.as_str());
        let pending_key = state_key(org_id, user_id);

        let saved = self
            .store
            .get(&pending_key)
            .await?
            .and_then(|s| OAuthState::decode(&s).ok());

        match saved {
            Some(saved) if saved.matches(&supplied) => {}
            _ => {
                warn!(org_id = %org_id, user_id = %user_id, "Invalid or expired OAuth state");
                return Err(ConnectorError::StateMismatch);
            }
        }

        let code = callback
            .code
            .ok_or_else(|| ConnectorError::BadRequest("Missing 'code' parameter".to_string()))?;

        debug!(org_id = %org_id, user_id = %user_id, "OAuth state validated, exchanging code");

        // Independent resources; both must finish before continuing.
        let oauth = self.config.oauth_config();
        let (token, deleted) = tokio::join!(
            exchange_code_for_token(&self.http_client, &oauth, &code),
            self.store.delete(&pending_key),
        );

        // A failed exchange is reported ahead of a failed cleanup.
        let token = token.map_err(|e| {
            error!(org_id = %org_id, user_id = %user_id, error = %e, "Token exchange failed");
            ConnectorError::TokenExchange(format!("{:#}", e))
        })?;
        deleted?;

        let encoded_token =
            serde_json::to_string(&token).context("Failed to serialize token response")?;
        self.store
            .set_with_ttl(
                &credentials_key(org_id, user_id),
                &encoded_token,
                TRANSIENT_TTL_SECONDS,
            )
            .await?;

        let metadata = create_integration_item_metadata(&token);
        info!(
            org_id = %org_id,
            user_id = %user_id,
            has_refresh_token = metadata.has_refresh_token,
            expires_in = ?metadata.expires_in,
            "HubSpot OAuth flow completed"
        );

        Ok(CLOSE_WINDOW_HTML)
    }

    /// Collect the credentials issued by the callback. Single use.
    pub async fn get_credentials(
        &self,
        user_id: &str,
        org_id: &str,
    ) -> Result<Value, ConnectorError> {
        let key = credentials_key(org_id, user_id);

        let raw = match self.store.get(&key).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err(ConnectorError::NoCredentials),
        };

        let credentials: Value = serde_json::from_str(&raw).map_err(|e| {
            warn!(org_id = %org_id, user_id = %user_id, error = %e, "Stored credentials are not JSON");
            ConnectorError::NoCredentials
        })?;
        if is_empty_credentials(&credentials) {
            return Err(ConnectorError::NoCredentials);
        }

        self.store.delete(&key).await?;
        debug!(org_id = %org_id, user_id = %user_id, "Credentials handed out and removed");

        Ok(credentials)
    }

    /// Fetch the first page of contacts and normalize them.
    ///
    /// `credentials` is the token response as returned by [`Self::get_credentials`],
    /// serialized as JSON.
    pub async fn get_items(&self, credentials: &str) -> Result<Vec<IntegrationItem>, ConnectorError> {
        let credentials: Value = serde_json::from_str(credentials)
            .map_err(|_| ConnectorError::BadRequest("Invalid credentials".to_string()))?;
        let access_token = credentials
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ConnectorError::BadRequest("Credentials missing access_token".to_string())
            })?;

        let client = HubSpotClient::new(&self.http_client, access_token, &self.config.api_base_url);
        let contacts = client.fetch_contacts().await?;

        let items: Vec<IntegrationItem> = contacts
            .iter()
            .filter_map(|contact| contact_to_item(contact, &self.config.app_base_url))
            .collect();

        debug!(count = items.len(), "Fetched HubSpot contacts");
        Ok(items)
    }
}

/// Store key for pending authorization state
pub fn state_key(org_id: &str, user_id: &str) -> String {
    store_key(PROVIDER, "state", org_id, user_id)
}

/// Store key for issued credentials
pub fn credentials_key(org_id: &str, user_id: &str) -> String {
    store_key(PROVIDER, "credentials", org_id, user_id)
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` carry no credentials.
fn is_empty_credentials(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
