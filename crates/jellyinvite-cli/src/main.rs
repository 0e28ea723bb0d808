//! jellyinvite CLI - Command-line interface for jellyinvite
//!
//! Provides commands for:
//! - Reconciling local user records with Jellyfin accounts
//! - Provisioning invited users
//! - Inspecting and deleting Jellyfin users
//! - Listing and scanning libraries
//! - Fetching profile pictures
//! - Managing server settings and invitations

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    completions::CompletionsCommand, context::AppContext, invitations::InvitationsCommand,
    invite::InviteCommand, libraries::LibrariesCommand, picture::PictureCommand,
    settings::SettingsCommand, sync::SyncCommand, users::UsersCommand,
};
use jellyinvite_core::config::Config;
use output::{get_formatter, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "jellyinvite",
    version,
    about = "Invitation and user management for Jellyfin"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Jellyfin server URL (overrides the stored setting)
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Jellyfin API key (overrides the stored setting)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile local users with Jellyfin accounts
    Sync(SyncCommand),
    /// Create a Jellyfin account from an invitation code
    Invite(InviteCommand),
    /// Inspect and delete Jellyfin users
    #[command(subcommand)]
    Users(UsersCommand),
    /// List and scan Jellyfin libraries
    #[command(subcommand)]
    Libraries(LibrariesCommand),
    /// Download a user's profile picture
    Picture(PictureCommand),
    /// Manage stored server settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Manage invitations
    #[command(subcommand)]
    Invitations(InvitationsCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    // Setup tracing
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    for error in config.validate() {
        tracing::warn!(%error, path = %config_path.display(), "Invalid configuration value");
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let ctx = AppContext::new(config, format, cli.server_url, cli.api_key);

    let result = match cli.command {
        Commands::Sync(cmd) => cmd.execute(&ctx).await,
        Commands::Invite(cmd) => cmd.execute(&ctx).await,
        Commands::Users(cmd) => cmd.execute(&ctx).await,
        Commands::Libraries(cmd) => cmd.execute(&ctx).await,
        Commands::Picture(cmd) => cmd.execute(&ctx).await,
        Commands::Settings(cmd) => cmd.execute(&ctx).await,
        Commands::Invitations(cmd) => cmd.execute(&ctx).await,
        Commands::Completions(cmd) => cmd.execute(&ctx).await,
    };

    if let Err(e) = result {
        get_formatter(cli.json).error(&format!("{e:#}"));
        std::process::exit(1);
    }
    Ok(())
}
