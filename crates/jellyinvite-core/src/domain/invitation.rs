//! Invitation entity
//!
//! An invitation grants a provisioning code access either to an explicit set
//! of libraries or, when none are listed, to every library the system knows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::LibraryId;

/// An invitation record owned by invitation storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Code handed to the invitee
    pub code: String,
    /// Comma-separated library identifiers; `None` means all libraries
    pub specific_libraries: Option<String>,
    /// Whether the invitation has been redeemed
    pub used: bool,
    /// Username that redeemed the invitation
    pub used_by: Option<String>,
    /// Expiry time, if the invitation expires
    pub expires: Option<DateTime<Utc>>,
    /// When the invitation was created
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Creates an unused, non-expiring invitation that grants all libraries
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            specific_libraries: None,
            used: false,
            used_by: None,
            expires: None,
            created_at: Utc::now(),
        }
    }

    /// Restricts the invitation to the given libraries
    pub fn with_libraries(mut self, libraries: &[LibraryId]) -> Self {
        let joined = libraries
            .iter()
            .map(LibraryId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.specific_libraries = Some(joined);
        self
    }

    /// Sets the expiry time
    pub fn with_expiry(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// The explicit library list, or `None` when the invitation grants all libraries
    ///
    /// Entries are trimmed and blank entries skipped. Every other entry is
    /// kept as is.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidLibraryId`] if an entry is not a valid id
    pub fn allowed_libraries(&self) -> Result<Option<Vec<LibraryId>>, DomainError> {
        self.specific_libraries
            .as_ref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(LibraryId::new)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
    }
}
