//! Completions command - Print a shell completion script for `jellyinvite`
//!
//! The script covers every subcommand and flag, including the `server-url`
//! and `api-key` values accepted by `settings set`. Install it with e.g.
//! `jellyinvite completions zsh > ~/.zfunc/_jellyinvite`.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use super::context::AppContext;

const BIN_NAME: &str = "jellyinvite";

/// Completions command arguments
#[derive(Debug, clap::Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Writes the script to stdout; needs neither the database nor the server
    pub async fn execute(&self, _ctx: &AppContext) -> Result<()> {
        let mut cmd = crate::Cli::command();
        clap_complete::generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
