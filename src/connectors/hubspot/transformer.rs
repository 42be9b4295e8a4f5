use chrono::{DateTime, Utc};

use super::api::HubSpotContact;
use crate::item::IntegrationItem;

pub const CONTACT_TYPE: &str = "contact";
pub const UNNAMED_CONTACT: &str = "Unnamed Contact";

/// Transform a HubSpot contact into an integration item.
///
/// URL: `{app_base_url}/contacts/{id}`. Contacts without an id yield `None`.
pub fn contact_to_item(contact: &HubSpotContact, app_base_url: &str) -> Option<IntegrationItem> {
    let Some(id) = contact.id.as_deref() else {
        tracing::warn!("Skipping HubSpot contact without id");
        return None;
    };

    Some(IntegrationItem {
        id: id.to_string(),
        item_type: CONTACT_TYPE.to_string(),
        name: contact_name(contact),
        creation_time: parse_timestamp(contact.created_at.as_deref()),
        last_modified_time: parse_timestamp(contact.updated_at.as_deref()),
        url: format!("{}/contacts/{}", app_base_url, id),
        visibility: true,
    })
}

/// "First Last", trimmed; placeholder when both are empty.
fn contact_name(contact: &HubSpotContact) -> String {
    let name = format!(
        "{} {}",
        contact.property("firstname"),
        contact.property("lastname")
    );
    let name = name.trim();
    if name.is_empty() {
        UNNAMED_CONTACT.to_string()
    } else {
        name.to_string()
    }
}

/// ISO 8601 timestamp, `None` when absent or unparseable.
fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(value = %value, error = %e, "Ignoring unparseable HubSpot timestamp");
            None
        }
    }
}
