//! Use cases (interactors) for jellyinvite
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate business rules to domain methods and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`InviteUserUseCase`] - Provision an invited account with a library-scoped policy
//! - [`SyncUsersUseCase`] - Reconcile local user records with media server accounts
//! - [`ProfilePictureUseCase`] - Profile image with generated-avatar fallback
//! - [`ScanLibrariesUseCase`] - Refresh the library directory from the media server

pub mod invite_user;
pub mod profile_picture;
pub mod scan_libraries;
pub mod sync_users;

#[cfg(test)]
pub(crate) mod mocks;

pub use invite_user::{InviteRequest, InviteUserUseCase};
pub use profile_picture::ProfilePictureUseCase;
pub use scan_libraries::ScanLibrariesUseCase;
pub use sync_users::{plan, SyncOutcome, SyncPlan, SyncUsersUseCase};
