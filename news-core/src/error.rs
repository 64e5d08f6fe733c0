use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("proxy responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed news payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid proxy url: {0}")]
    Url(#[from] url::ParseError),
    #[error("fetch task ended without a result")]
    Interrupted,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("credential is not a three-part token")]
    MalformedToken,
    #[error("credential payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("credential claims could not be read: {0}")]
    Claims(#[from] serde_json::Error),
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error("configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {name}: {value}")]
    InvalidOverride { name: &'static str, value: String },
    #[error("no news provider API key configured (set NEWS_API_KEY)")]
    MissingApiKey,
}
