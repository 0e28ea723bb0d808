//! jellyinvite Store - Local persistence
//!
//! SQLite-based storage for:
//! - Settings (media server URL and API key)
//! - Invitations
//! - The library directory
//! - Local user records mirrored from the media server
//!
//! ## Architecture
//!
//! This crate implements the storage ports from `jellyinvite-core`
//! ([`ISettingsStore`], [`IInvitationStore`], [`ILibraryDirectory`],
//! [`ILocalUserStore`]) with a single SQLite-backed repository. It is a
//! driven (secondary) adapter in the hexagonal architecture.
//!
//! [`ISettingsStore`]: jellyinvite_core::ports::ISettingsStore
//! [`IInvitationStore`]: jellyinvite_core::ports::IInvitationStore
//! [`ILibraryDirectory`]: jellyinvite_core::ports::ILibraryDirectory
//! [`ILocalUserStore`]: jellyinvite_core::ports::ILocalUserStore
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use jellyinvite_store::{DatabasePool, SqliteRepository};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let pool = DatabasePool::new(Path::new("/var/lib/jellyinvite/jellyinvite.db")).await?;
//! let repo = SqliteRepository::new(pool.pool().clone());
//! // Use repo as any of the storage ports...
//! # Ok(())
//! # }
//! ```

pub mod pool;
pub mod repository;

pub use pool::DatabasePool;
pub use repository::SqliteRepository;

/// Errors that can occur during storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to establish a database connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A database query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be turned back into a domain type
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::QueryFailed(e.to_string())
    }
}
