//! OAuth provider endpoints and client registration.

/// OAuth provider configuration
#[derive(Clone, Debug)]
pub struct OAuthProviderConfig {
    /// OAuth authorization endpoint URL
    pub auth_url: String,

    /// OAuth token exchange endpoint URL
    pub token_url: String,

    /// Required OAuth scopes
    pub scopes: Vec<String>,

    pub client_id: String,

    pub client_secret: String,

    /// Where the provider sends the user back (must match the app registration)
    pub redirect_uri: String,
}

impl OAuthProviderConfig {
    /// Build authorization URL carrying the serialized state
    pub fn build_auth_url(&self, state: &str) -> String {
        let scopes = self.scopes.join(" ");
        format!(
            "{}?client_id={}&redirect_uri={}&scope={}&state={}",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&scopes),
            urlencoding::encode(state)
        )
    }
}
