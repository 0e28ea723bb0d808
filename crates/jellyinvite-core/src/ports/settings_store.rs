//! Settings store port
//!
//! Key/value settings owned by the backend. The media server URL and API key
//! live here under [`SERVER_URL_KEY`] and [`SERVER_API_KEY_KEY`].

use std::collections::HashMap;

use crate::domain::server::{SERVER_API_KEY_KEY, SERVER_URL_KEY};
use crate::domain::ServerConfig;

/// Port trait for settings storage
#[async_trait::async_trait]
pub trait ISettingsStore: Send + Sync {
    /// Looks up the given keys
    ///
    /// Keys with no stored value are absent from the returned map.
    async fn get(&self, keys: &[&str]) -> anyhow::Result<HashMap<String, String>>;

    /// Stores a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Resolves the media server connection settings.
///
/// When both `url` and `api_key` are supplied they are used as is and the
/// store is not consulted. Otherwise both keys are read from `settings`, and
/// a supplied value still takes precedence over the stored one.
///
/// # Errors
/// Returns [`ServiceError::Configuration`] if either value is still missing
pub async fn resolve_server_config(
    url: Option<String>,
    api_key: Option<String>,
    settings: &dyn ISettingsStore,
) -> anyhow::Result<ServerConfig> {
    if let (Some(url), Some(api_key)) = (&url, &api_key) {
        if !url.is_empty() && !api_key.is_empty() {
            return Ok(ServerConfig::new(url.clone(), api_key.clone())?);
        }
    }

    let mut stored = settings.get(&[SERVER_URL_KEY, SERVER_API_KEY_KEY]).await?;
    let url = url
        .filter(|u| !u.is_empty())
        .or_else(|| stored.remove(SERVER_URL_KEY));
    let api_key = api_key
        .filter(|k| !k.is_empty())
        .or_else(|| stored.remove(SERVER_API_KEY_KEY));

    Ok(ServerConfig::from_parts(url, api_key)?)
}
