//! Sync command - Reconcile local users with Jellyfin
//!
//! Provides the `jellyinvite sync` CLI command which:
//! 1. Opens the database and resolves the server settings
//! 2. Runs the user synchronization use case
//! 3. Reports the imported and pruned counts and the current user list

use anyhow::Result;
use clap::Args;

use jellyinvite_core::usecases::SyncUsersUseCase;

use super::context::AppContext;

/// Sync command options
#[derive(Debug, Args)]
pub struct SyncCommand {}

impl SyncCommand {
    /// Execute the sync command
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = ctx.formatter();

        let repo = ctx.repository().await?;
        let media_server = ctx.media_server(&repo).await?;

        formatter.info("Synchronizing users with Jellyfin...");
        let outcome = SyncUsersUseCase::new(media_server, repo).execute().await?;

        if ctx.format().is_json() {
            let json = serde_json::json!({
                "imported": outcome.imported,
                "pruned": outcome.pruned,
                "users": outcome.users,
            });
            formatter.print_json(&json);
        } else {
            formatter.success(&format!(
                "Sync complete: {} imported, {} pruned",
                outcome.imported, outcome.pruned
            ));
            let rows: Vec<Vec<String>> = outcome
                .users
                .iter()
                .map(|u| vec![u.id.to_string(), u.name.clone()])
                .collect();
            formatter.table(&["ID", "NAME"], &rows);
        }

        Ok(())
    }
}
