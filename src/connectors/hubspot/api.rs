use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ConnectorError;

/// HubSpot CRM contact (`/crm/v3/objects/contacts` result entry).
#[derive(Debug, Deserialize)]
pub struct HubSpotContact {
    /// Records without an id cannot be linked and are skipped by the transformer
    #[serde(default)]
    pub id: Option<String>,
    /// Property values may be `null` in HubSpot responses
    #[serde(default)]
    pub properties: HashMap<String, Option<String>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

impl HubSpotContact {
    /// Property value, empty when absent or null
    pub fn property(&self, name: &str) -> &str {
        self.properties
            .get(name)
            .and_then(|v| v.as_deref())
            .unwrap_or("")
    }
}

/// One page of a CRM object listing. Paging cursors are ignored.
#[derive(Debug, Deserialize)]
pub struct ContactsPage {
    #[serde(default)]
    pub results: Vec<HubSpotContact>,
}

/// HTTP client for the HubSpot CRM API.
///
/// Authenticates every request with the OAuth access token as a Bearer token.
pub struct HubSpotClient<'a> {
    access_token: &'a str,
    http_client: &'a Client,
    base_url: &'a str,
}

impl<'a> HubSpotClient<'a> {
    pub fn new(http_client: &'a Client, access_token: &'a str, base_url: &'a str) -> Self {
        Self {
            access_token,
            http_client,
            base_url,
        }
    }

    /// Fetch the first page of contacts.
    ///
    /// Any status other than 200 fails with [`ConnectorError::Upstream`]
    /// carrying the upstream status code.
    pub async fn fetch_contacts(&self) -> Result<Vec<HubSpotContact>, ConnectorError> {
        let url = format!("{}/crm/v3/objects/contacts", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.access_token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "HubSpot contacts request failed");
            return Err(ConnectorError::Upstream {
                status: status.as_u16(),
            });
        }

        let page: ContactsPage = response.json().await?;
        Ok(page.results)
    }
}
