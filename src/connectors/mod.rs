//! External service connectors.
//!
//! Each connector owns its OAuth registration, its API client and the
//! transformation of provider records into [`crate::item::IntegrationItem`]s.

pub mod hubspot;

pub use hubspot::HubSpotConnector;
