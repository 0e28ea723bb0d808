//! Media server port (driven/secondary port)
//!
//! This module defines the interface for talking to the media server's
//! REST API. The implementation in `jellyinvite-jellyfin` targets Jellyfin.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific.
//!   Implementations raise [`ServiceError`](crate::domain::ServiceError) values
//!   for the classified failures (non-200 status, missing fields, transport) so
//!   callers can recover them with `downcast_ref`.
//! - Every method is a single request; implementations must not retry.

use serde_json::Value;

use crate::domain::{ImageRequest, RemoteLibrary, RemoteUser, UserId, UserPolicy};

/// Port trait for media server operations
#[async_trait::async_trait]
pub trait IMediaServer: Send + Sync {
    /// Lists the media folders visible on the server
    ///
    /// Fails with `NotFound` if the response carries no item list.
    async fn list_libraries(&self) -> anyhow::Result<Vec<RemoteLibrary>>;

    /// Lists every user account on the server
    async fn list_users(&self) -> anyhow::Result<Vec<RemoteUser>>;

    /// Retrieves a single user account
    async fn get_user(&self, user_id: &UserId) -> anyhow::Result<RemoteUser>;

    /// Retrieves a user's policy
    ///
    /// Fails with `NotFound` if the user object carries no policy.
    async fn get_user_policy(&self, user_id: &UserId) -> anyhow::Result<UserPolicy>;

    /// Deletes a user account
    async fn delete_user(&self, user_id: &UserId) -> anyhow::Result<()>;

    /// Creates an account with the given name and password
    ///
    /// # Returns
    /// The newly created account, including the server's default policy
    async fn create_user(&self, name: &str, password: &str) -> anyhow::Result<RemoteUser>;

    /// Replaces a user's policy
    ///
    /// # Returns
    /// The server's response body
    async fn update_user_policy(
        &self,
        user_id: &UserId,
        policy: &UserPolicy,
    ) -> anyhow::Result<Value>;

    /// Downloads a user's primary profile image
    ///
    /// # Returns
    /// The raw image bytes, in whatever format the server produced
    async fn get_profile_image(
        &self,
        user_id: &UserId,
        request: &ImageRequest,
    ) -> anyhow::Result<Vec<u8>>;
}
