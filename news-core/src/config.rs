use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

const APP_DIR: &str = "tesla-news";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PortalConfig {
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    pub port: u16,
    /// Provider credential. Only ever supplied by the operator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub provider_url: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the proxy service.
    pub proxy_url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            api_key: None,
            provider_url: "https://newsapi.org/v2/everything".to_owned(),
            request_timeout_seconds: 10,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: "http://localhost:5001".to_owned(),
        }
    }
}

impl ProxyConfig {
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

/// `~/.config/tesla-news` on Linux.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoConfigDir)
}

impl PortalConfig {
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.json"))
    }

    /// Loads the configuration file, falling back to defaults (and writing
    /// them out) when it is missing or unreadable, then applies environment
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_file_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "failed to load configuration, using defaults");
                let default_config = Self::default();
                if let Err(save_err) = default_config.save() {
                    warn!(error = %save_err, "failed to save default configuration");
                }
                default_config
            }
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Applies `PORT`, `NEWS_API_KEY`, `NEWS_API_URL` and `NEWS_PROXY_URL`
    /// from `lookup`. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(port) = get("PORT") {
            self.proxy.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidOverride {
                    name: "PORT",
                    value: port.clone(),
                })?;
        }
        if let Some(key) = get("NEWS_API_KEY") {
            self.proxy.api_key = Some(key);
        }
        if let Some(url) = get("NEWS_API_URL") {
            self.proxy.provider_url = url;
        }
        if let Some(url) = get("NEWS_PROXY_URL") {
            self.client.proxy_url = url;
        }
        Ok(())
    }
}
