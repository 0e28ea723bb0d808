//! Settings command - Manage the stored Jellyfin connection settings

use anyhow::Result;
use clap::{Subcommand, ValueEnum};

use jellyinvite_core::domain::server::{SERVER_API_KEY_KEY, SERVER_URL_KEY};
use jellyinvite_core::ports::ISettingsStore;

use super::context::AppContext;

/// A setting that can be stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    /// Jellyfin base URL
    ServerUrl,
    /// Jellyfin API key
    ApiKey,
}

impl SettingKey {
    fn storage_key(self) -> &'static str {
        match self {
            SettingKey::ServerUrl => SERVER_URL_KEY,
            SettingKey::ApiKey => SERVER_API_KEY_KEY,
        }
    }
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Store a setting
    Set {
        /// Setting to change
        #[arg(value_enum)]
        key: SettingKey,
        /// New value
        value: String,
    },
    /// Show stored settings (the API key is masked)
    Show,
}

impl SettingsCommand {
    /// Execute the settings command
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = ctx.formatter();
        let repo = ctx.repository().await?;

        match self {
            SettingsCommand::Set { key, value } => {
                if value.trim().is_empty() {
                    anyhow::bail!("Value for {} must not be empty", key.storage_key());
                }
                repo.set(key.storage_key(), value.trim()).await?;
                formatter.success(&format!("Saved {}", key.storage_key()));
            }
            SettingsCommand::Show => {
                let values = repo.get(&[SERVER_URL_KEY, SERVER_API_KEY_KEY]).await?;
                let url = values.get(SERVER_URL_KEY).cloned();
                let api_key = values.get(SERVER_API_KEY_KEY).map(|k| mask(k));

                if ctx.format().is_json() {
                    formatter.print_json(&serde_json::json!({
                        SERVER_URL_KEY: url,
                        SERVER_API_KEY_KEY: api_key,
                    }));
                } else {
                    let unset = || "(not set)".to_string();
                    formatter.success("Stored settings");
                    formatter.info(&format!("{}: {}", SERVER_URL_KEY, url.unwrap_or_else(unset)));
                    formatter.info(&format!(
                        "{}: {}",
                        SERVER_API_KEY_KEY,
                        api_key.unwrap_or_else(unset)
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Keeps the last four characters of a secret
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
