//! CLI subcommands
//!
//! Each command receives the shared [`context::AppContext`], which opens the
//! database and builds the Jellyfin adapters on demand.

pub mod completions;
pub mod context;
pub mod invitations;
pub mod invite;
pub mod libraries;
pub mod picture;
pub mod settings;
pub mod sync;
pub mod users;
