//! Pending authorization state for CSRF protection.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Random bytes behind each state token
pub const STATE_TOKEN_BYTES: usize = 32;

/// State carried through the provider redirect and kept in the transient store.
///
/// Serialized as JSON both in the `state` query parameter and in the store,
/// so the callback can recover `(org_id, user_id)` without any session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    /// Random CSRF token
    pub state: String,
    pub user_id: String,
    pub org_id: String,
}

impl OAuthState {
    /// Create a state with a fresh random token
    pub fn new(user_id: &str, org_id: &str) -> Self {
        Self {
            state: generate_state_token(),
            user_id: user_id.to_string(),
            org_id: org_id.to_string(),
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn decode(encoded: &str) -> serde_json::Result<Self> {
        serde_json::from_str(encoded)
    }

    /// True when `other` carries the same CSRF token
    pub fn matches(&self, other: &OAuthState) -> bool {
        self.state == other.state
    }
}

/// Generate a URL-safe token from OS randomness (43 characters)
pub fn generate_state_token() -> String {
    let mut bytes = [0u8; STATE_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
