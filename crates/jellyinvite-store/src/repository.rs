//! SQLite implementation of the storage ports
//!
//! This module provides the concrete SQLite-based implementation of the
//! settings, invitation, library directory and local user ports defined in
//! jellyinvite-core. It handles domain type conversion and SQL query
//! construction.
//!
//! ## Type Mapping
//!
//! | Domain Type   | SQL Type | Strategy                                      |
//! |---------------|----------|-----------------------------------------------|
//! | UserId        | TEXT     | String via `.as_str()` / `UserId::new()`      |
//! | LibraryId     | TEXT     | String via `.as_str()` / `LibraryId::new()`   |
//! | DateTime<Utc> | TEXT     | ISO 8601 via `to_rfc3339()` / `DateTime::parse_from_rfc3339()` |
//! | bool          | INTEGER  | 0 / 1                                         |

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use jellyinvite_core::domain::{
    Invitation, LibraryId, LocalUser, RemoteLibrary, ServiceError, UserId,
};
use jellyinvite_core::ports::{IInvitationStore, ILibraryDirectory, ILocalUserStore, ISettingsStore};

use crate::StoreError;

/// SQLite-based implementation of every storage port
///
/// All operations are performed through a connection pool.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a new repository instance with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Marks a local user as verified
    ///
    /// # Returns
    /// `true` if a user with that token existed
    pub async fn mark_verified(&self, token: &UserId) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE users SET verified = 1 WHERE token = ?")
            .bind(token.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Helper functions for type conversion
// ============================================================================

/// Parse a DateTime<Utc> from an ISO 8601 string
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // SQLite's CURRENT_TIMESTAMP format
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| {
            StoreError::SerializationError(format!("Failed to parse datetime '{}': {}", s, e))
        })
}

/// Parse an optional DateTime<Utc> from an optional string
fn parse_optional_datetime(s: Option<String>) -> Result<Option<DateTime<Utc>>, StoreError> {
    match s {
        Some(ref val) if !val.is_empty() => parse_datetime(val).map(Some),
        _ => Ok(None),
    }
}

// ============================================================================
// Row mapping functions
// ============================================================================

/// Reconstruct an Invitation from a database row
fn invitation_from_row(row: &SqliteRow) -> Result<Invitation, StoreError> {
    let created_at_str: String = row.get("created_at");
    let expires_str: Option<String> = row.get("expires");

    Ok(Invitation {
        code: row.get("code"),
        specific_libraries: row.get("specific_libraries"),
        used: row.get("used"),
        used_by: row.get("used_by"),
        expires: parse_optional_datetime(expires_str)?,
        created_at: parse_datetime(&created_at_str)?,
    })
}

/// Reconstruct a RemoteLibrary from a database row
fn library_from_row(row: &SqliteRow) -> Result<RemoteLibrary, StoreError> {
    let id_str: String = row.get("id");
    let id = LibraryId::new(id_str.clone()).map_err(|e| {
        StoreError::SerializationError(format!("Invalid LibraryId '{}': {}", id_str, e))
    })?;

    let mut library = RemoteLibrary::new(id, row.get::<String, _>("name"));
    library.collection_type = row.get("collection_type");
    Ok(library)
}

/// Reconstruct a LocalUser from a database row
fn local_user_from_row(row: &SqliteRow) -> Result<LocalUser, StoreError> {
    let token_str: String = row.get("token");
    let created_at_str: String = row.get("created_at");

    let token = UserId::new(token_str.clone()).map_err(|e| {
        StoreError::SerializationError(format!("Invalid UserId '{}': {}", token_str, e))
    })?;

    Ok(LocalUser {
        id: row.get("id"),
        username: row.get("username"),
        token,
        email: row.get("email"),
        verified: row.get("verified"),
        created_at: parse_datetime(&created_at_str)?,
    })
}

// ============================================================================
// ISettingsStore
// ============================================================================

#[async_trait::async_trait]
impl ISettingsStore for SqliteRepository {
    async fn get(&self, keys: &[&str]) -> anyhow::Result<HashMap<String, String>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; keys.len()].join(", ");
        let sql = format!("SELECT key, value FROM settings WHERE key IN ({placeholders})");

        let mut query = sqlx::query(&sql);
        for key in keys {
            query = query.bind(*key);
        }
        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| (row.get::<String, _>("key"), row.get::<String, _>("value")))
            .collect())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        tracing::trace!(key, "Saved setting");
        Ok(())
    }
}

// ============================================================================
// IInvitationStore
// ============================================================================

#[async_trait::async_trait]
impl IInvitationStore for SqliteRepository {
    async fn get_by_code(&self, code: &str) -> anyhow::Result<Invitation> {
        let row = sqlx::query("SELECT * FROM invitations WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(invitation_from_row(r)?),
            None => Err(ServiceError::NotFound("Invitation not found".to_string()).into()),
        }
    }

    async fn save(&self, invitation: &Invitation) -> anyhow::Result<()> {
        let expires = invitation.expires.map(|dt| dt.to_rfc3339());
        let created_at = invitation.created_at.to_rfc3339();

        sqlx::query(
            "INSERT OR REPLACE INTO invitations \
             (code, specific_libraries, used, used_by, expires, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&invitation.code)
        .bind(&invitation.specific_libraries)
        .bind(invitation.used)
        .bind(&invitation.used_by)
        .bind(&expires)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        tracing::trace!(code = %invitation.code, "Saved invitation");
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<Invitation>> {
        let rows = sqlx::query("SELECT * FROM invitations ORDER BY created_at DESC, code")
            .fetch_all(&self.pool)
            .await?;

        let mut invitations = Vec::with_capacity(rows.len());
        for row in &rows {
            invitations.push(invitation_from_row(row)?);
        }
        Ok(invitations)
    }
}

// ============================================================================
// ILibraryDirectory
// ============================================================================

#[async_trait::async_trait]
impl ILibraryDirectory for SqliteRepository {
    async fn list_all_ids(&self) -> anyhow::Result<Vec<LibraryId>> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM libraries ORDER BY position")
            .fetch_all(&self.pool)
            .await?;

        let ids = ids
            .into_iter()
            .map(|id| {
                LibraryId::new(id.clone()).map_err(|e| {
                    StoreError::SerializationError(format!("Invalid LibraryId '{}': {}", id, e))
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(ids)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<RemoteLibrary>> {
        let rows = sqlx::query("SELECT * FROM libraries ORDER BY position")
            .fetch_all(&self.pool)
            .await?;

        let mut libraries = Vec::with_capacity(rows.len());
        for row in &rows {
            libraries.push(library_from_row(row)?);
        }
        Ok(libraries)
    }

    async fn replace_all(&self, libraries: &[RemoteLibrary]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM libraries").execute(&mut *tx).await?;

        for (position, library) in libraries.iter().enumerate() {
            sqlx::query(
                "INSERT OR REPLACE INTO libraries (id, name, collection_type, position) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(library.id.as_str())
            .bind(&library.name)
            .bind(&library.collection_type)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(count = libraries.len(), "Replaced library directory");
        Ok(())
    }
}

// ============================================================================
// ILocalUserStore
// ============================================================================

#[async_trait::async_trait]
impl ILocalUserStore for SqliteRepository {
    async fn list(&self, verified_only: bool) -> anyhow::Result<Vec<LocalUser>> {
        let sql = if verified_only {
            "SELECT * FROM users WHERE verified = 1 ORDER BY id"
        } else {
            "SELECT * FROM users ORDER BY id"
        };
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            users.push(local_user_from_row(row)?);
        }
        Ok(users)
    }

    async fn create(&self, username: &str, token: &UserId) -> anyhow::Result<LocalUser> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (username, token, verified, created_at) VALUES (?, ?, 0, ?)",
        )
        .bind(username)
        .bind(token.as_str())
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let mut user = LocalUser::new(result.last_insert_rowid(), username, token.clone());
        user.created_at = created_at;

        tracing::trace!(username, token = %token, "Created local user");
        Ok(user)
    }

    async fn get_by_token(
        &self,
        token: &UserId,
        verify: bool,
    ) -> anyhow::Result<Option<LocalUser>> {
        let sql = if verify {
            "SELECT * FROM users WHERE token = ? AND verified = 1"
        } else {
            "SELECT * FROM users WHERE token = ?"
        };
        let row = sqlx::query(sql)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(Some(local_user_from_row(r)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, user: &LocalUser) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        tracing::trace!(username = %user.username, "Deleted local user");
        Ok(())
    }
}
