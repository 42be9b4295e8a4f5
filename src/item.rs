//! Provider-agnostic record produced by every connector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One external record, normalized for cross-integration use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegrationItem {
    pub id: String,

    /// Record kind, e.g. `"contact"`
    #[serde(rename = "type")]
    pub item_type: String,

    /// Display name
    pub name: String,

    pub creation_time: Option<DateTime<Utc>>,

    pub last_modified_time: Option<DateTime<Utc>>,

    /// Link to the record in the provider's web UI
    pub url: String,

    pub visibility: bool,
}
