//! Domain entities and business logic
//!
//! This module contains the core domain types for jellyinvite:
//! - Newtypes for media server identifiers
//! - Remote users, libraries and policies as exchanged with the server
//! - Invitations and local user records owned by storage
//! - Server connection settings and image request parameters
//! - The error taxonomy

pub mod errors;
pub mod image;
pub mod invitation;
pub mod library;
pub mod newtypes;
pub mod policy;
pub mod server;
pub mod user;

// Re-export commonly used types
pub use errors::{DomainError, ServiceError};
pub use image::{AvatarRequest, ImageRequest};
pub use invitation::Invitation;
pub use library::RemoteLibrary;
pub use newtypes::*;
pub use policy::UserPolicy;
pub use server::ServerConfig;
pub use user::{LocalUser, RemoteUser};
