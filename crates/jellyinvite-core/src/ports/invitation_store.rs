//! Invitation store port

use crate::domain::Invitation;

/// Port trait for invitation storage
#[async_trait::async_trait]
pub trait IInvitationStore: Send + Sync {
    /// Retrieves an invitation by its code
    ///
    /// # Errors
    /// Fails with `NotFound` if no invitation has that code
    async fn get_by_code(&self, code: &str) -> anyhow::Result<Invitation>;

    /// Saves an invitation (insert or update, keyed by code)
    async fn save(&self, invitation: &Invitation) -> anyhow::Result<()>;

    /// Lists all invitations, newest first
    async fn list(&self) -> anyhow::Result<Vec<Invitation>>;
}
