//! Profile picture request parameters

use serde::{Deserialize, Serialize};

/// Size and quality of a requested profile image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Maximum height in pixels
    pub max_height: u32,
    /// Maximum width in pixels
    pub max_width: u32,
    /// Encoder quality (0-100)
    pub quality: u8,
}

impl Default for ImageRequest {
    fn default() -> Self {
        Self {
            max_height: 150,
            max_width: 150,
            quality: 30,
        }
    }
}

/// Placeholder name rendered when no local user is known
pub const AVATAR_PLACEHOLDER: &str = "ERROR";

/// Parameters for the generated-avatar fallback
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarRequest {
    /// Name the initials are derived from
    pub name: String,
    /// Number of characters rendered
    pub length: u8,
    /// Font size as a fraction of the image, if not the service default
    pub font_size: Option<f32>,
}

impl AvatarRequest {
    /// A single-initial avatar for a known user
    pub fn for_username(username: impl Into<String>) -> Self {
        Self {
            name: username.into(),
            length: 1,
            font_size: None,
        }
    }

    /// The placeholder avatar used when the user is unknown
    pub fn placeholder() -> Self {
        Self {
            name: AVATAR_PLACEHOLDER.to_string(),
            length: 60,
            font_size: Some(0.28),
        }
    }
}
