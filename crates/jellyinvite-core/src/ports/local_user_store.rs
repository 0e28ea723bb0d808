//! Local user store port
//!
//! ## Design Notes
//!
//! - Each create and delete must be atomic on its own. No operation here
//!   spans more than one record, and callers get no cross-call transaction.

use crate::domain::{LocalUser, UserId};

/// Port trait for local user storage
#[async_trait::async_trait]
pub trait ILocalUserStore: Send + Sync {
    /// Lists local users
    ///
    /// When `verified_only` is true, unverified records are skipped.
    async fn list(&self, verified_only: bool) -> anyhow::Result<Vec<LocalUser>>;

    /// Creates a local user record
    ///
    /// # Returns
    /// The stored record, with its assigned row id
    async fn create(&self, username: &str, token: &UserId) -> anyhow::Result<LocalUser>;

    /// Looks up a local user by token
    ///
    /// When `verify` is true, only a verified record is returned.
    async fn get_by_token(&self, token: &UserId, verify: bool)
        -> anyhow::Result<Option<LocalUser>>;

    /// Deletes a local user record
    async fn delete(&self, user: &LocalUser) -> anyhow::Result<()>;
}
