use crate::error::CallError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from the default path (~/.config/callsense/config.toml),
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> Result<Self, CallError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, CallError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| CallError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Write current configuration to the default path.
    pub fn save(&self) -> Result<(), CallError> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| CallError::Config(e.to_string()))?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("callsense")
            .join("config.toml")
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Enable CORS.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            cors: true,
        }
    }
}

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Evict rooms idle longer than this many seconds (unset = keep forever).
    pub room_ttl_secs: Option<u64>,
    /// How often the eviction sweeper runs, in seconds.
    pub sweep_interval_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            room_ttl_secs: None,
            sweep_interval_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("127.0.0.1"));
        assert!(toml_str.contains("sweep_interval_secs"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = AppConfig::default();
        config.server.port = 9000;
        config.store.room_ttl_secs = Some(3600);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.store.room_ttl_secs, Some(3600));
        assert_eq!(parsed.store.sweep_interval_secs, 60);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig = toml::from_str("[server]\nport = 3000\n").unwrap();
        assert_eq!(parsed.server.port, 3000);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert!(parsed.store.room_ttl_secs.is_none());
    }
}
