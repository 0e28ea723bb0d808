//! Per-user media server policy
//!
//! The server's policy object has dozens of fields. This system only ever
//! writes two of them (`EnableAllFolders`, `EnabledFolders`) and must send
//! the rest back untouched, so the policy is kept as an open JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::newtypes::LibraryId;

/// Policy key controlling access to every library
pub const ENABLE_ALL_FOLDERS: &str = "EnableAllFolders";

/// Policy key listing the libraries visible to the user
pub const ENABLED_FOLDERS: &str = "EnabledFolders";

/// A user policy as exchanged with the media server (PascalCase keys)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserPolicy(Map<String, Value>);

impl UserPolicy {
    /// Creates an empty policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a policy that restricts the user to exactly `libraries`
    pub fn library_scoped(libraries: &[LibraryId]) -> Self {
        let mut map = Map::new();
        map.insert(ENABLE_ALL_FOLDERS.to_string(), Value::Bool(false));
        map.insert(
            ENABLED_FOLDERS.to_string(),
            Value::Array(
                libraries
                    .iter()
                    .map(|id| Value::String(id.as_str().to_string()))
                    .collect(),
            ),
        );
        Self(map)
    }

    /// Copies every field of `source` into this policy.
    ///
    /// On key collision the value from `source` wins.
    pub fn overlay(&mut self, source: &UserPolicy) {
        for (key, value) in &source.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Value of `EnableAllFolders`, if present and boolean
    pub fn enable_all_folders(&self) -> Option<bool> {
        self.0.get(ENABLE_ALL_FOLDERS).and_then(Value::as_bool)
    }

    /// Library identifiers listed under `EnabledFolders`
    ///
    /// Non-string and empty entries are skipped.
    pub fn enabled_folders(&self) -> Vec<LibraryId> {
        self.0
            .get(ENABLED_FOLDERS)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(|s| LibraryId::new(s).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Raw access to a single policy field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets a single policy field
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Number of fields in the policy
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the policy has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the policy into a JSON value suitable for a request body
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for UserPolicy {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
