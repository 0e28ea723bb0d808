//! jellyinvite Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `RemoteUser`, `RemoteLibrary`, `UserPolicy`, `Invitation`, `LocalUser`
//! - **Use cases** - `InviteUserUseCase`, `SyncUsersUseCase`, `ProfilePictureUseCase`, `ScanLibrariesUseCase`
//! - **Port definitions** - Traits for adapters: `IMediaServer`, `IAvatarService`,
//!   `ISettingsStore`, `IInvitationStore`, `ILibraryDirectory`, `ILocalUserStore`
//!
//! # Architecture
//!
//! The domain module contains pure data types with no I/O.
//! Ports define trait interfaces that adapter crates implement
//! (`jellyinvite-jellyfin` for the media server, `jellyinvite-store` for storage).
//! Use cases orchestrate domain types through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
