// Service and store configuration
pub mod config;

// Connector error taxonomy
pub mod error;

// Normalized item model
pub mod item;

// OAuth 2.0 authorization-code plumbing
pub mod oauth;

// Transient key-value store
pub mod store;

// Provider connectors
pub mod connectors;

// HTTP routing
pub mod api;

pub use connectors::HubSpotConnector;
pub use error::ConnectorError;
pub use item::IntegrationItem;
pub use store::TransientStore;
