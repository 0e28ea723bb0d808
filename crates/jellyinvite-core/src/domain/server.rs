//! Media server connection settings
//!
//! [`ServerConfig`] is resolved once (from caller overrides, then the
//! settings store) and injected into the remote client.

use serde::{Deserialize, Serialize};

use super::errors::ServiceError;

/// Settings key holding the media server base URL
pub const SERVER_URL_KEY: &str = "server_url";

/// Settings key holding the media server API key
pub const SERVER_API_KEY_KEY: &str = "server_api_key";

/// Base URL and API key for the media server
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    url: String,
    api_key: String,
}

impl ServerConfig {
    /// Creates a config from explicit values
    ///
    /// # Errors
    /// Returns [`ServiceError::Configuration`] if either value is empty
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ServiceError> {
        Self::from_parts(Some(url.into()), Some(api_key.into()))
    }

    /// Creates a config from values that may be missing
    ///
    /// Empty strings count as missing.
    ///
    /// # Errors
    /// Returns [`ServiceError::Configuration`] naming the first missing value
    pub fn from_parts(url: Option<String>, api_key: Option<String>) -> Result<Self, ServiceError> {
        let url = url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ServiceError::Configuration("Server URL is not set".to_string()))?;
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ServiceError::Configuration("Server API key is not set".to_string()))?;
        Ok(Self { url, api_key })
    }

    /// The base URL exactly as configured
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Joins a resource path onto the base URL.
    ///
    /// The base always ends with exactly one `/` and the path never starts
    /// with one, so `http://host/` + `/Users` and `http://host` + `Users`
    /// both give `http://host/Users`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
