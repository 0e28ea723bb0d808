//! Library scan use case
//!
//! Copies the media server's folder list into the library directory so the
//! "all libraries" invitation fallback has something to grant.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    domain::RemoteLibrary,
    ports::{ILibraryDirectory, IMediaServer},
};

/// Use case for refreshing the library directory from the media server
pub struct ScanLibrariesUseCase {
    media_server: Arc<dyn IMediaServer>,
    libraries: Arc<dyn ILibraryDirectory>,
}

impl ScanLibrariesUseCase {
    /// Creates a new ScanLibrariesUseCase with the required dependencies
    pub fn new(media_server: Arc<dyn IMediaServer>, libraries: Arc<dyn ILibraryDirectory>) -> Self {
        Self {
            media_server,
            libraries,
        }
    }

    /// Replaces the directory with the server's current folders
    ///
    /// # Returns
    /// The libraries now stored
    pub async fn execute(&self) -> Result<Vec<RemoteLibrary>> {
        let remote = self
            .media_server
            .list_libraries()
            .await
            .context("Failed to list media server libraries")?;

        self.libraries
            .replace_all(&remote)
            .await
            .context("Failed to store libraries")?;

        info!(count = remote.len(), "Libraries scanned");
        Ok(remote)
    }
}
