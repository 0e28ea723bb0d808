//! Invite command - Provision a Jellyfin account from an invitation code

use anyhow::Result;
use clap::Args;

use jellyinvite_core::usecases::{InviteRequest, InviteUserUseCase};

use super::context::AppContext;

/// Invite command arguments
#[derive(Debug, Args)]
pub struct InviteCommand {
    /// Invitation code to redeem
    #[arg(long)]
    pub code: String,

    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Password for the new account
    #[arg(long)]
    pub password: String,

    /// Email address of the invitee
    #[arg(long)]
    pub email: String,
}

impl InviteCommand {
    /// Execute the invite command
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = ctx.formatter();

        let repo = ctx.repository().await?;
        let media_server = ctx.media_server(&repo).await?;

        let request = InviteRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            code: self.code.clone(),
            email: self.email.clone(),
        };

        let response = InviteUserUseCase::new(media_server, repo.clone(), repo)
            .execute(&request)
            .await?;

        if ctx.format().is_json() {
            formatter.print_json(&response);
        } else {
            formatter.success(&format!("Created Jellyfin user '{}'", self.username));
        }

        Ok(())
    }
}
