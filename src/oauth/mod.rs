//! OAuth 2.0 authorization-code plumbing shared by connectors.
//!
//! Flow:
//! 1. Connector creates an [`OAuthState`] and stores it in the transient store
//! 2. User is sent to the provider's authorization URL (state attached)
//! 3. Provider redirects back with `code` + `state`
//! 4. State is checked against the stored copy, code is exchanged for a token
//! 5. Raw token response is parked in the store until the client collects it

pub mod exchange;
pub mod provider;
mod state;

pub use exchange::exchange_code_for_token;
pub use provider::OAuthProviderConfig;
pub use state::{generate_state_token, OAuthState, STATE_TOKEN_BYTES};

use serde::Deserialize;

/// How long pending state and issued credentials stay in the store
pub const TRANSIENT_TTL_SECONDS: u64 = 600;

/// OAuth callback query parameters
#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
