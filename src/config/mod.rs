use anyhow::{bail, Context, Result};
use serde::Deserialize;

// Connector credentials are validated separately at startup
pub use crate::connectors::hubspot::config::HubSpotConfig;

/// Service configuration (everything except connector credentials)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Which transient store backs the OAuth flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => bail!("Unknown store backend '{}' (expected memory or redis)", other),
        }
    }
}

/// Transient store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Prepended to every Redis key
    #[serde(default)]
    pub key_prefix: String,
    /// Sweep interval for the in-memory backend
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

fn default_backend() -> StoreBackend {
    StoreBackend::Memory
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_cleanup_interval() -> u64 {
    60
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            redis_url: default_redis_url(),
            key_prefix: String::new(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

impl AppConfig {
    /// Load from the TOML file named by `INTEGRATIONS_CONFIG` (defaults if unset),
    /// then apply env overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("INTEGRATIONS_CONFIG") {
            Ok(path) => load_config(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.store.cleanup_interval_seconds == 0 {
            bail!("store.cleanup_interval_seconds must be at least 1");
        }
        Ok(())
    }

    /// Override fields from `INTEGRATIONS_BIND_ADDR`, `INTEGRATIONS_STORE_BACKEND`, `REDIS_URL`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("INTEGRATIONS_BIND_ADDR") {
            self.server.bind_addr = v;
        }
        if let Ok(v) = std::env::var("INTEGRATIONS_STORE_BACKEND") {
            self.store.backend = v.parse()?;
        }
        if let Ok(v) = std::env::var("REDIS_URL") {
            self.store.redis_url = v;
        }
        Ok(())
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| format!("Invalid config file {}", path))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 3] = [
        "INTEGRATIONS_BIND_ADDR",
        "INTEGRATIONS_STORE_BACKEND",
        "REDIS_URL",
    ];

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.redis_url, "redis://localhost:6379");
        assert_eq!(config.store.cleanup_interval_seconds, 60);
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
            [server]
            bind_addr = "127.0.0.1:9000"

            [store]
            backend = "redis"
            redis_url = "redis://cache:6379/2"
            key_prefix = "integrations:"
        "#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.redis_url, "redis://cache:6379/2");
        assert_eq!(config.store.key_prefix, "integrations:");
        assert_eq!(config.store.cleanup_interval_seconds, 60); // Default
    }

    #[test]
    fn test_partial_config() {
        // Test that missing sections use defaults
        let toml = r#"
            [store]
            cleanup_interval_seconds = 5
        "#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.store.cleanup_interval_seconds, 5);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(toml::from_str::<AppConfig>("[store]\nbackend = \"mongo\"").is_err());
        assert!("mongo".parse::<StoreBackend>().is_err());
        assert_eq!("Redis".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind_addr = \"127.0.0.1:8123\"").unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8123");

        assert!(load_config("/nonexistent/integrations.toml").is_err());
    }

    #[test]
    fn test_zero_cleanup_interval_rejected() {
        let mut config = AppConfig::default();
        config.store.cleanup_interval_seconds = 0;
        assert!(config.validate().is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store]\ncleanup_interval_seconds = 0").unwrap();
        assert!(load_config(file.path().to_str().unwrap()).is_err());

        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let _lock = ENV_LOCK.lock().unwrap();

        std::env::set_var("INTEGRATIONS_BIND_ADDR", "127.0.0.1:7000");
        std::env::set_var("INTEGRATIONS_STORE_BACKEND", "REDIS");
        std::env::set_var("REDIS_URL", "redis://cache:6380/1");

        let mut config = AppConfig::default();
        config.apply_env_overrides().unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:7000");
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.redis_url, "redis://cache:6380/1");
        // Untouched by env
        assert_eq!(config.store.cleanup_interval_seconds, 60);

        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_override_invalid_backend() {
        let _lock = ENV_LOCK.lock().unwrap();

        std::env::set_var("INTEGRATIONS_STORE_BACKEND", "mongo");
        let result = AppConfig::default().apply_env_overrides();
        std::env::remove_var("INTEGRATIONS_STORE_BACKEND");

        assert!(result.is_err());
    }

    #[test]
    fn test_no_env_overrides_keeps_config() {
        let _lock = ENV_LOCK.lock().unwrap();

        for var in ENV_VARS {
            std::env::remove_var(var);
        }

        let mut config = AppConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.redis_url, "redis://localhost:6379");
    }
}
