//! Avatar service port
//!
//! A query-parameter-driven image generator used when the media server
//! cannot supply a profile picture.

use crate::domain::AvatarRequest;

/// Port trait for generated avatars
#[async_trait::async_trait]
pub trait IAvatarService: Send + Sync {
    /// Renders an avatar for the given request
    ///
    /// # Returns
    /// The raw image bytes
    ///
    /// # Errors
    /// Fails with `RemoteApi` if the service answers with anything but 200
    async fn generate(&self, request: &AvatarRequest) -> anyhow::Result<Vec<u8>>;
}
