//! User synchronization use case
//!
//! Reconciles local user records with the media server's accounts, keyed by
//! remote user id (stored locally as the user's token).
//!
//! ## Flow
//!
//! 1. **Plan**: two pure set differences, `remote - local` (to import) and
//!    `local - remote` (to prune), computed by [`plan`]
//! 2. **Import**: create a local record for every remote-only account
//! 3. **Prune**: delete every local-only record
//! 4. **Report**: re-fetch the remote user list
//!
//! The import pass finishes before the prune pass starts. Nothing spans the
//! two passes: a failure part-way leaves the records partially reconciled
//! and is not rolled back.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    domain::{LocalUser, RemoteUser, UserId},
    ports::{ILocalUserStore, IMediaServer},
};

/// The changes needed to converge local records onto the remote accounts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncPlan {
    /// Remote accounts with no local record
    pub to_import: Vec<RemoteUser>,
    /// Local records with no remote account
    pub to_prune: Vec<LocalUser>,
}

impl SyncPlan {
    /// Returns true if local records already match the remote accounts
    pub fn is_empty(&self) -> bool {
        self.to_import.is_empty() && self.to_prune.is_empty()
    }
}

/// Computes the import and prune sets. Input order is preserved in both.
pub fn plan(remote: &[RemoteUser], local: &[LocalUser]) -> SyncPlan {
    let local_tokens: HashSet<&UserId> = local.iter().map(|u| &u.token).collect();
    let remote_ids: HashSet<&UserId> = remote.iter().map(|u| &u.id).collect();

    SyncPlan {
        to_import: remote
            .iter()
            .filter(|u| !local_tokens.contains(&u.id))
            .cloned()
            .collect(),
        to_prune: local
            .iter()
            .filter(|u| !remote_ids.contains(&u.token))
            .cloned()
            .collect(),
    }
}

/// Summary of a completed synchronization
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Number of local records created
    pub imported: usize,
    /// Number of local records deleted
    pub pruned: usize,
    /// The remote user list as re-fetched after reconciliation
    pub users: Vec<RemoteUser>,
}

/// Use case for reconciling local users with media server accounts
pub struct SyncUsersUseCase {
    media_server: Arc<dyn IMediaServer>,
    local_users: Arc<dyn ILocalUserStore>,
}

impl SyncUsersUseCase {
    /// Creates a new SyncUsersUseCase with the required dependencies
    pub fn new(media_server: Arc<dyn IMediaServer>, local_users: Arc<dyn ILocalUserStore>) -> Self {
        Self {
            media_server,
            local_users,
        }
    }

    /// Runs a full reconciliation pass
    ///
    /// # Errors
    ///
    /// Returns the first failure. Changes applied before it are kept.
    pub async fn execute(&self) -> Result<SyncOutcome> {
        let remote = self
            .media_server
            .list_users()
            .await
            .context("Failed to list media server users")?;
        let local = self
            .local_users
            .list(false)
            .await
            .context("Failed to list local users")?;

        let plan = plan(&remote, &local);
        debug!(
            remote = remote.len(),
            local = local.len(),
            to_import = plan.to_import.len(),
            to_prune = plan.to_prune.len(),
            "Computed user sync plan"
        );

        let imported = self.apply_imports(&plan.to_import).await?;
        let pruned = self.apply_prunes(&plan.to_prune).await?;

        let users = self
            .media_server
            .list_users()
            .await
            .context("Failed to re-list media server users")?;

        Ok(SyncOutcome {
            imported,
            pruned,
            users,
        })
    }

    /// Creates a local record for each remote account
    pub async fn apply_imports(&self, users: &[RemoteUser]) -> Result<usize> {
        for user in users {
            self.local_users
                .create(&user.name, &user.id)
                .await
                .with_context(|| format!("Failed to import user {}", user.name))?;
            info!(username = %user.name, user_id = %user.id, "User imported to database");
        }
        Ok(users.len())
    }

    /// Deletes each local record
    pub async fn apply_prunes(&self, users: &[LocalUser]) -> Result<usize> {
        for user in users {
            self.local_users
                .delete(user)
                .await
                .with_context(|| format!("Failed to delete user {}", user.username))?;
            info!(username = %user.username, "User deleted from database");
        }
        Ok(users.len())
    }
}
