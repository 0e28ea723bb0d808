//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the use cases
//! depend on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IMediaServer`] - Media server REST operations (users, libraries, policies, images)
//! - [`IAvatarService`] - Generated-avatar fallback for profile pictures
//! - [`ISettingsStore`] - Key/value settings (server URL, API key)
//! - [`IInvitationStore`] - Invitation records
//! - [`ILibraryDirectory`] - Libraries known to the system
//! - [`ILocalUserStore`] - Local user records mirrored from the media server

pub mod avatar_service;
pub mod invitation_store;
pub mod library_directory;
pub mod local_user_store;
pub mod media_server;
pub mod settings_store;

pub use avatar_service::IAvatarService;
pub use invitation_store::IInvitationStore;
pub use library_directory::ILibraryDirectory;
pub use local_user_store::ILocalUserStore;
pub use media_server::IMediaServer;
pub use settings_store::{resolve_server_config, ISettingsStore};
