//! Media library (folder) entity

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::newtypes::LibraryId;

/// A media folder exposed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteLibrary {
    /// Server-assigned identifier
    pub id: LibraryId,
    /// Display name
    pub name: String,
    /// Collection type (`movies`, `tvshows`, `music`, ...), absent for mixed folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RemoteLibrary {
    /// Creates a library with no collection type
    pub fn new(id: LibraryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            collection_type: None,
            extra: Map::new(),
        }
    }

    /// Sets the collection type
    pub fn with_collection_type(mut self, collection_type: impl Into<String>) -> Self {
        self.collection_type = Some(collection_type.into());
        self
    }
}
