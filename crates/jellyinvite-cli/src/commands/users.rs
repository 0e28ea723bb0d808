//! Users command - Inspect and delete Jellyfin accounts

use anyhow::{Context, Result};
use clap::Subcommand;

use jellyinvite_core::domain::UserId;

use super::context::AppContext;

/// Users subcommands
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List every Jellyfin user
    List,
    /// Show a single Jellyfin user
    Get {
        /// Jellyfin user ID
        id: UserId,
    },
    /// Delete a Jellyfin user
    Delete {
        /// Jellyfin user ID
        id: UserId,
    },
}

impl UsersCommand {
    /// Execute the users command
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            UsersCommand::List => self.execute_list(ctx).await,
            UsersCommand::Get { id } => self.execute_get(ctx, id).await,
            UsersCommand::Delete { id } => self.execute_delete(ctx, id).await,
        }
    }

    async fn execute_list(&self, ctx: &AppContext) -> Result<()> {
        let formatter = ctx.formatter();
        let repo = ctx.repository().await?;
        let users = ctx.media_server(&repo).await?.list_users().await?;

        if ctx.format().is_json() {
            formatter.print_json(&serde_json::to_value(&users)?);
        } else {
            formatter.success(&format!("{} Jellyfin user(s)", users.len()));
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| vec![u.id.to_string(), u.name.clone()])
                .collect();
            formatter.table(&["ID", "NAME"], &rows);
        }
        Ok(())
    }

    async fn execute_get(&self, ctx: &AppContext, id: &UserId) -> Result<()> {
        let formatter = ctx.formatter();
        let repo = ctx.repository().await?;
        let user = ctx.media_server(&repo).await?.get_user(id).await?;

        if ctx.format().is_json() {
            formatter.print_json(&serde_json::to_value(&user)?);
        } else {
            formatter.success(&format!("{} ({})", user.name, user.id));
            if let Some(policy) = &user.policy {
                let folders = policy.enabled_folders();
                let all = policy.enable_all_folders().unwrap_or(false);
                formatter.info(&format!("All libraries: {}", if all { "yes" } else { "no" }));
                if !folders.is_empty() {
                    let names: Vec<&str> = folders.iter().map(|f| f.as_str()).collect();
                    formatter.info(&format!("Enabled libraries: {}", names.join(", ")));
                }
            }
        }
        Ok(())
    }

    async fn execute_delete(&self, ctx: &AppContext, id: &UserId) -> Result<()> {
        let formatter = ctx.formatter();
        let repo = ctx.repository().await?;
        ctx.media_server(&repo)
            .await?
            .delete_user(id)
            .await
            .with_context(|| format!("Failed to delete user {id}"))?;

        formatter.success(&format!("Deleted Jellyfin user {id}"));
        Ok(())
    }
}
