//! jellyinvite Jellyfin - Jellyfin REST API client
//!
//! Provides async clients for:
//! - Jellyfin transport (GET/POST/DELETE with token headers and strict
//!   200-only status checking)
//! - Typed resource operations (users, policies, media folders, images)
//! - The generated-avatar service used as a profile picture fallback
//!
//! ## Modules
//!
//! - [`client`] - Jellyfin HTTP client and resource operations
//! - [`provider`] - [`IMediaServer`](jellyinvite_core::ports::IMediaServer) adapter
//! - [`avatar`] - ui-avatars client implementing
//!   [`IAvatarService`](jellyinvite_core::ports::IAvatarService)
//!
//! Every failure is reported as a
//! [`ServiceError`](jellyinvite_core::domain::ServiceError).

pub mod avatar;
pub mod client;
pub mod provider;

pub use avatar::UiAvatarsClient;
pub use client::{JellyfinClient, SUCCESS_STATUS};
pub use provider::JellyfinMediaServer;
