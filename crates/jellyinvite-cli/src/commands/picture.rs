//! Picture command - Download a user's profile picture
//!
//! Falls back to a generated avatar when Jellyfin has no image for the user.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jellyinvite_core::domain::{ImageRequest, UserId};
use jellyinvite_core::usecases::ProfilePictureUseCase;

use super::context::AppContext;

/// Picture command arguments
#[derive(Debug, Args)]
pub struct PictureCommand {
    /// Jellyfin user ID
    pub user_id: UserId,

    /// File to write the image to (`-` for stdout)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Maximum image height in pixels
    #[arg(long, default_value_t = 150)]
    pub max_height: u32,

    /// Maximum image width in pixels
    #[arg(long, default_value_t = 150)]
    pub max_width: u32,

    /// Encoder quality (0-100)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,
}

impl PictureCommand {
    /// Execute the picture command
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let formatter = ctx.formatter();

        let repo = ctx.repository().await?;
        let media_server = ctx.media_server(&repo).await?;
        let avatars = ctx.avatar_service()?;

        let request = ImageRequest {
            max_height: self.max_height,
            max_width: self.max_width,
            quality: self.quality,
        };
        let image = ProfilePictureUseCase::new(media_server, avatars, repo)
            .execute(&self.user_id, &request)
            .await?
            .into_inner();

        if self.output.as_os_str() == "-" {
            std::io::stdout()
                .write_all(&image)
                .context("Failed to write image to stdout")?;
            return Ok(());
        }

        tokio::fs::write(&self.output, &image)
            .await
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        if ctx.format().is_json() {
            formatter.print_json(&serde_json::json!({
                "user_id": self.user_id,
                "path": self.output,
                "bytes": image.len(),
            }));
        } else {
            formatter.success(&format!(
                "Saved {} bytes to {}",
                image.len(),
                self.output.display()
            ));
        }
        Ok(())
    }
}
