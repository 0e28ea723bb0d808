//! JellyfinMediaServer - IMediaServer implementation for the Jellyfin API
//!
//! Thin adapter from the [`IMediaServer`] port onto [`JellyfinClient`]. The
//! client's [`ServiceError`](jellyinvite_core::domain::ServiceError) values
//! pass through unchanged so use cases can still `downcast_ref` them.

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use jellyinvite_core::domain::{ImageRequest, RemoteLibrary, RemoteUser, UserId, UserPolicy};
use jellyinvite_core::ports::IMediaServer;

use crate::client::JellyfinClient;

/// Media server implementation backed by a [`JellyfinClient`]
pub struct JellyfinMediaServer {
    client: JellyfinClient,
}

impl JellyfinMediaServer {
    /// Creates a new `JellyfinMediaServer` wrapping the given client
    pub fn new(client: JellyfinClient) -> Self {
        Self { client }
    }

    /// Returns the wrapped client
    pub fn client(&self) -> &JellyfinClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IMediaServer for JellyfinMediaServer {
    async fn list_libraries(&self) -> Result<Vec<RemoteLibrary>> {
        debug!("JellyfinMediaServer::list_libraries");
        Ok(self.client.list_libraries().await?)
    }

    async fn list_users(&self) -> Result<Vec<RemoteUser>> {
        debug!("JellyfinMediaServer::list_users");
        Ok(self.client.list_users().await?)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<RemoteUser> {
        debug!(user_id = %user_id, "JellyfinMediaServer::get_user");
        Ok(self.client.get_user(user_id).await?)
    }

    async fn get_user_policy(&self, user_id: &UserId) -> Result<UserPolicy> {
        debug!(user_id = %user_id, "JellyfinMediaServer::get_user_policy");
        Ok(self.client.get_user_policy(user_id).await?)
    }

    async fn delete_user(&self, user_id: &UserId) -> Result<()> {
        debug!(user_id = %user_id, "JellyfinMediaServer::delete_user");
        Ok(self.client.delete_user(user_id).await?)
    }

    async fn create_user(&self, name: &str, password: &str) -> Result<RemoteUser> {
        debug!(name, "JellyfinMediaServer::create_user");
        Ok(self.client.create_user(name, password).await?)
    }

    async fn update_user_policy(&self, user_id: &UserId, policy: &UserPolicy) -> Result<Value> {
        debug!(
            user_id = %user_id,
            keys = policy.len(),
            "JellyfinMediaServer::update_user_policy"
        );
        Ok(self.client.update_user_policy(user_id, policy).await?)
    }

    async fn get_profile_image(&self, user_id: &UserId, request: &ImageRequest) -> Result<Vec<u8>> {
        debug!(user_id = %user_id, "JellyfinMediaServer::get_profile_image");
        Ok(self.client.get_profile_image(user_id, request).await?)
    }
}
