//! Remote and local user entities
//!
//! A [`RemoteUser`] is an account on the media server. A [`LocalUser`] is the
//! invitation backend's own record of that account; its `token` holds the
//! remote user's identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::newtypes::UserId;
use super::policy::UserPolicy;

/// A user account as returned by the media server
///
/// Fields other than `Id`, `Name` and `Policy` are kept in `extra` so the
/// object can be handed back to callers without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteUser {
    /// Server-assigned identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Access policy (absent on some partial responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<UserPolicy>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RemoteUser {
    /// Creates a remote user with no policy and no extra fields
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            policy: None,
            extra: Map::new(),
        }
    }

    /// Attaches a policy
    pub fn with_policy(mut self, policy: UserPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
}

/// A user record held by local storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUser {
    /// Storage row identifier
    pub id: i64,
    /// Username (the remote display name at import time)
    pub username: String,
    /// Remote user identifier
    pub token: UserId,
    /// Email captured at signup, if any
    pub email: Option<String>,
    /// Whether the account completed verification
    pub verified: bool,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl LocalUser {
    /// Creates an unverified local user with no email
    pub fn new(id: i64, username: impl Into<String>, token: UserId) -> Self {
        Self {
            id,
            username: username.into(),
            token,
            email: None,
            verified: false,
            created_at: Utc::now(),
        }
    }
}
