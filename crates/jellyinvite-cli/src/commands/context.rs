//! Shared wiring for CLI commands
//!
//! Opens the SQLite repository, resolves the Jellyfin server settings
//! (command-line overrides first, then the settings table) and builds the
//! adapters the use cases depend on.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use jellyinvite_core::config::Config;
use jellyinvite_core::domain::ServerConfig;
use jellyinvite_core::ports::{resolve_server_config, IAvatarService, IMediaServer};
use jellyinvite_jellyfin::{JellyfinClient, JellyfinMediaServer, UiAvatarsClient};
use jellyinvite_store::{DatabasePool, SqliteRepository};

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Everything a command needs to build its use case
pub struct AppContext {
    config: Config,
    format: OutputFormat,
    server_url: Option<String>,
    api_key: Option<String>,
}

impl AppContext {
    pub fn new(
        config: Config,
        format: OutputFormat,
        server_url: Option<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            config,
            format,
            server_url,
            api_key,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format.is_json())
    }

    /// Opens the database and runs migrations
    pub async fn repository(&self) -> Result<Arc<SqliteRepository>> {
        let pool = DatabasePool::from_config(&self.config.database)
            .await
            .context("Failed to open database")?;
        info!(path = %self.config.database.path.display(), "Opened database");
        Ok(Arc::new(SqliteRepository::new(pool.pool().clone())))
    }

    /// Resolves the Jellyfin URL and API key
    pub async fn server_config(&self, repo: &SqliteRepository) -> Result<ServerConfig> {
        let config = resolve_server_config(self.server_url.clone(), self.api_key.clone(), repo)
            .await
            .context("Failed to resolve Jellyfin server settings")?;
        debug!(?config, "Resolved server settings");
        Ok(config)
    }

    /// Builds the Jellyfin adapter
    pub async fn media_server(&self, repo: &SqliteRepository) -> Result<Arc<dyn IMediaServer>> {
        let config = self.server_config(repo).await?;
        let server = JellyfinMediaServer::new(JellyfinClient::new(config)?);
        debug!(url = server.client().config().url(), "Built Jellyfin adapter");
        Ok(Arc::new(server))
    }

    /// Builds the generated-avatar client from the `avatar` config section
    pub fn avatar_service(&self) -> Result<Arc<dyn IAvatarService>> {
        Ok(Arc::new(UiAvatarsClient::new(
            self.config.avatar.base_url.clone(),
        )?))
    }
}
