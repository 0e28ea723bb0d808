//! Invitations command - Create and list invitation codes

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Subcommand;

use jellyinvite_core::domain::{Invitation, LibraryId};
use jellyinvite_core::ports::IInvitationStore;

use super::context::AppContext;

/// Length of generated invitation codes
const CODE_LENGTH: usize = 8;

/// Invitations subcommands
#[derive(Debug, Subcommand)]
pub enum InvitationsCommand {
    /// Create a new invitation
    Create {
        /// Invitation code (generated when omitted)
        #[arg(long)]
        code: Option<String>,

        /// Restrict the invitation to these library IDs (comma-separated)
        #[arg(long, value_delimiter = ',')]
        libraries: Vec<LibraryId>,

        /// Expire the invitation after this many days
        #[arg(long)]
        expires_in_days: Option<u32>,
    },
    /// List stored invitations
    List,
}

impl InvitationsCommand {
    /// Execute the invitations command
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = ctx.formatter();
        let repo = ctx.repository().await?;

        match self {
            InvitationsCommand::Create {
                code,
                libraries,
                expires_in_days,
            } => {
                let code = match code.as_deref().map(str::trim) {
                    Some("") => anyhow::bail!("Invitation code must not be empty"),
                    Some(code) => code.to_string(),
                    None => generate_code(),
                };

                let mut invitation = Invitation::new(code);
                if !libraries.is_empty() {
                    invitation = invitation.with_libraries(libraries);
                }
                if let Some(days) = expires_in_days {
                    invitation = invitation.with_expiry(Utc::now() + Duration::days(i64::from(*days)));
                }

                repo.save(&invitation).await?;
                tracing::info!(code = %invitation.code, "Created invitation");

                if ctx.format().is_json() {
                    formatter.print_json(&serde_json::to_value(&invitation)?);
                } else {
                    formatter.success(&format!("Created invitation {}", invitation.code));
                }
            }
            InvitationsCommand::List => {
                let invitations = IInvitationStore::list(&*repo).await?;

                if ctx.format().is_json() {
                    formatter.print_json(&serde_json::to_value(&invitations)?);
                } else {
                    formatter.success(&format!("{} invitation(s)", invitations.len()));
                    let rows: Vec<Vec<String>> = invitations.iter().map(invitation_row).collect();
                    formatter.table(&["CODE", "LIBRARIES", "USED BY", "EXPIRES"], &rows);
                }
            }
        }
        Ok(())
    }
}

/// Random uppercase code taken from a v4 UUID
fn generate_code() -> String {
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(CODE_LENGTH)
        .collect::<String>()
        .to_uppercase()
}

fn invitation_row(invitation: &Invitation) -> Vec<String> {
    let used_by = match (&invitation.used_by, invitation.used) {
        (Some(name), _) => name.clone(),
        (None, true) => "(used)".to_string(),
        (None, false) => "-".to_string(),
    };
    vec![
        invitation.code.clone(),
        invitation
            .specific_libraries
            .clone()
            .unwrap_or_else(|| "all".to_string()),
        used_by,
        invitation
            .expires
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string()),
    ]
}
