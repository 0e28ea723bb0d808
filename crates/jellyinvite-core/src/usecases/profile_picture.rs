//! Profile picture use case
//!
//! Fetches a user's profile image from the media server, falling back to a
//! generated avatar when the server cannot supply one.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
    domain::{AvatarRequest, ImageRequest, UserId},
    ports::{IAvatarService, ILocalUserStore, IMediaServer},
};

/// Use case for retrieving profile pictures
pub struct ProfilePictureUseCase {
    media_server: Arc<dyn IMediaServer>,
    avatars: Arc<dyn IAvatarService>,
    local_users: Arc<dyn ILocalUserStore>,
}

impl ProfilePictureUseCase {
    /// Creates a new ProfilePictureUseCase with the required dependencies
    pub fn new(
        media_server: Arc<dyn IMediaServer>,
        avatars: Arc<dyn IAvatarService>,
        local_users: Arc<dyn ILocalUserStore>,
    ) -> Self {
        Self {
            media_server,
            avatars,
            local_users,
        }
    }

    /// Returns the image bytes for `user_id`, undecoded
    ///
    /// Any media server failure triggers the fallback: the local user is
    /// looked up by token (verified or not) and the avatar service renders
    /// their initial, or a placeholder when no local user exists.
    ///
    /// # Errors
    ///
    /// Fails if the fallback also fails (`RemoteApi` for a non-200 answer),
    /// or if the local user lookup fails.
    pub async fn execute(
        &self,
        user_id: &UserId,
        request: &ImageRequest,
    ) -> Result<Cursor<Vec<u8>>> {
        match self.media_server.get_profile_image(user_id, request).await {
            Ok(bytes) => {
                debug!(user_id = %user_id, bytes = bytes.len(), "Fetched profile image");
                Ok(Cursor::new(bytes))
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Profile image unavailable, using avatar");
                let avatar = self.fallback_request(user_id).await?;
                let bytes = self
                    .avatars
                    .generate(&avatar)
                    .await
                    .context("Failed to get profile picture")?;
                Ok(Cursor::new(bytes))
            }
        }
    }

    async fn fallback_request(&self, user_id: &UserId) -> Result<AvatarRequest> {
        let user = self
            .local_users
            .get_by_token(user_id, false)
            .await
            .context("Failed to look up local user")?;
        Ok(match user {
            Some(user) => AvatarRequest::for_username(user.username),
            None => AvatarRequest::placeholder(),
        })
    }
}
