use crate::oauth::OAuthProviderConfig;
use anyhow::{Context, Result};

pub const API_BASE_URL: &str = "https://api.hubapi.com";
pub const APP_BASE_URL: &str = "https://app.hubspot.com";
pub const AUTH_URL: &str = "https://app.hubspot.com/oauth/authorize";
pub const TOKEN_URL: &str = "https://api.hubapi.com/oauth/v1/token";
pub const SCOPES: &[&str] = &["oauth", "crm.objects.contacts.read"];

/// HubSpot app registration and endpoints.
///
/// Required environment variables:
/// - `HUBSPOT_CLIENT_ID`
/// - `HUBSPOT_CLIENT_SECRET`
/// - `HUBSPOT_REDIRECT_URI`
///
/// Endpoint overrides (mostly for testing against a mock server):
/// `HUBSPOT_AUTH_URL`, `HUBSPOT_TOKEN_URL`, `HUBSPOT_API_BASE_URL`, `HUBSPOT_APP_BASE_URL`.
#[derive(Clone, Debug)]
pub struct HubSpotConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_base_url: String,
    pub app_base_url: String,
}

impl HubSpotConfig {
    /// Config with the public HubSpot endpoints.
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
            app_base_url: APP_BASE_URL.to_string(),
        }
    }

    /// Load config from environment variables. Any missing credential is fatal.
    pub fn from_env() -> Result<Self> {
        let client_id =
            std::env::var("HUBSPOT_CLIENT_ID").context("HUBSPOT_CLIENT_ID not set")?;
        let client_secret =
            std::env::var("HUBSPOT_CLIENT_SECRET").context("HUBSPOT_CLIENT_SECRET not set")?;
        let redirect_uri =
            std::env::var("HUBSPOT_REDIRECT_URI").context("HUBSPOT_REDIRECT_URI not set")?;

        let mut config = Self::new(client_id, client_secret, redirect_uri);
        if let Ok(v) = std::env::var("HUBSPOT_AUTH_URL") {
            config.auth_url = v;
        }
        if let Ok(v) = std::env::var("HUBSPOT_TOKEN_URL") {
            config.token_url = v;
        }
        if let Ok(v) = std::env::var("HUBSPOT_API_BASE_URL") {
            config.api_base_url = v;
        }
        if let Ok(v) = std::env::var("HUBSPOT_APP_BASE_URL") {
            config.app_base_url = v;
        }
        Ok(config)
    }

    /// Point token exchange and API calls at `base_url` (for testing with a mock server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.token_url = format!("{}/oauth/v1/token", base_url);
        self.api_base_url = base_url.to_string();
        self
    }

    /// Returns the OAuth provider config for HubSpot.
    pub fn oauth_config(&self) -> OAuthProviderConfig {
        OAuthProviderConfig {
            auth_url: self.auth_url.clone(),
            token_url: self.token_url.clone(),
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
        }
    }
}
