//! Library directory port
//!
//! The set of libraries the backend knows about. Populated from the media
//! server by the library scan and read when an invitation grants every library.

use crate::domain::{LibraryId, RemoteLibrary};

/// Port trait for the library directory
#[async_trait::async_trait]
pub trait ILibraryDirectory: Send + Sync {
    /// Identifiers of every known library, in storage order
    async fn list_all_ids(&self) -> anyhow::Result<Vec<LibraryId>>;

    /// Every known library, in storage order
    async fn list_all(&self) -> anyhow::Result<Vec<RemoteLibrary>>;

    /// Replaces the directory contents with `libraries`
    async fn replace_all(&self, libraries: &[RemoteLibrary]) -> anyhow::Result<()>;
}
