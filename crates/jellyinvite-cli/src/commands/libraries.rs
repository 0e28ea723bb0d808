//! Libraries command - List and scan Jellyfin media folders

use anyhow::Result;
use clap::Subcommand;

use jellyinvite_core::domain::RemoteLibrary;
use jellyinvite_core::ports::ILibraryDirectory;
use jellyinvite_core::usecases::ScanLibrariesUseCase;

use super::context::AppContext;
use crate::output::OutputFormatter;

/// Libraries subcommands
#[derive(Debug, Subcommand)]
pub enum LibrariesCommand {
    /// List libraries
    List {
        /// Show the locally stored directory instead of querying Jellyfin
        #[arg(long)]
        local: bool,
    },
    /// Refresh the local library directory from Jellyfin
    Scan,
}

impl LibrariesCommand {
    /// Execute the libraries command
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = ctx.formatter();
        let repo = ctx.repository().await?;

        let (libraries, headline) = match self {
            LibrariesCommand::List { local: true } => {
                let libraries = repo.list_all().await?;
                let headline = format!("{} stored librar(ies)", libraries.len());
                (libraries, headline)
            }
            LibrariesCommand::List { local: false } => {
                let libraries = ctx.media_server(&repo).await?.list_libraries().await?;
                let headline = format!("{} Jellyfin librar(ies)", libraries.len());
                (libraries, headline)
            }
            LibrariesCommand::Scan => {
                let media_server = ctx.media_server(&repo).await?;
                let libraries = ScanLibrariesUseCase::new(media_server, repo.clone())
                    .execute()
                    .await?;
                let headline = format!("Scanned {} librar(ies)", libraries.len());
                (libraries, headline)
            }
        };

        if ctx.format().is_json() {
            formatter.print_json(&serde_json::to_value(&libraries)?);
        } else {
            formatter.success(&headline);
            print_libraries(formatter.as_ref(), &libraries);
        }
        Ok(())
    }
}

fn print_libraries(formatter: &dyn OutputFormatter, libraries: &[RemoteLibrary]) {
    let rows: Vec<Vec<String>> = libraries
        .iter()
        .map(|l| {
            vec![
                l.id.to_string(),
                l.name.clone(),
                l.collection_type.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    formatter.table(&["ID", "NAME", "TYPE"], &rows);
}
