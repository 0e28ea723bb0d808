//! Invite user use case
//!
//! Provisions a media server account for an invitation code, scoped to the
//! libraries the invitation grants.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    domain::{ServiceError, UserPolicy},
    ports::{IInvitationStore, ILibraryDirectory, IMediaServer},
};

/// Input for [`InviteUserUseCase::execute`]
#[derive(Debug, Clone, Default)]
pub struct InviteRequest {
    /// Username for the new account
    pub username: String,
    /// Password for the new account
    pub password: String,
    /// Invitation code being redeemed
    pub code: String,
    /// Invitee email. Required, but only validated.
    pub email: String,
}

impl InviteRequest {
    fn validate(&self) -> Result<(), ServiceError> {
        let fields = [
            &self.username,
            &self.password,
            &self.code,
            &self.email,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ServiceError::Validation(
                "Missing required user input.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Use case for provisioning an invited user on the media server
pub struct InviteUserUseCase {
    media_server: Arc<dyn IMediaServer>,
    invitations: Arc<dyn IInvitationStore>,
    libraries: Arc<dyn ILibraryDirectory>,
}

impl InviteUserUseCase {
    /// Creates a new InviteUserUseCase with the required dependencies
    pub fn new(
        media_server: Arc<dyn IMediaServer>,
        invitations: Arc<dyn IInvitationStore>,
        libraries: Arc<dyn ILibraryDirectory>,
    ) -> Self {
        Self {
            media_server,
            invitations,
            libraries,
        }
    }

    /// Creates the account and applies the invitation's library policy
    ///
    /// This method:
    /// 1. Validates that every input is present
    /// 2. Resolves the invitation and its target library set
    /// 3. Creates the account (name and password only)
    /// 4. Builds a library-scoped policy and overlays the account's
    ///    server-assigned policy on top of it
    /// 5. Submits the merged policy
    ///
    /// # Returns
    ///
    /// The media server's response to the policy update
    ///
    /// # Errors
    ///
    /// - `Validation` if any input is empty (no storage or HTTP call is made)
    /// - `NotFound` if the invitation code does not exist
    /// - any media server failure, unchanged
    pub async fn execute(&self, request: &InviteRequest) -> Result<Value> {
        request.validate()?;

        let invitation = self
            .invitations
            .get_by_code(&request.code)
            .await
            .context("Failed to look up invitation")?;

        let allowed = invitation
            .allowed_libraries()
            .context("Invitation lists an invalid library")?;
        let sections = match allowed {
            Some(libraries) => libraries,
            None => self
                .libraries
                .list_all_ids()
                .await
                .context("Failed to list known libraries")?,
        };
        debug!(
            code = %invitation.code,
            libraries = sections.len(),
            "Resolved invitation libraries"
        );

        let user = self
            .media_server
            .create_user(&request.username, &request.password)
            .await
            .context("Failed to create media server user")?;

        // The server's policy is applied last, so its values win on collision.
        let mut policy = UserPolicy::library_scoped(&sections);
        if let Some(ref server_policy) = user.policy {
            policy.overlay(server_policy);
        }

        let response = self
            .media_server
            .update_user_policy(&user.id, &policy)
            .await
            .context("Failed to update user policy")?;

        info!(user_id = %user.id, username = %user.name, "Invited user provisioned");
        Ok(response)
    }
}
