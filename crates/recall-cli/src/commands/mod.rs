mod list_files;
mod rehydrate;
mod replay;

use anyhow::Result;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rehydrate a session to a point in time and print the resulting tree.
    Rehydrate(rehydrate::Rehydrate),
    /// List a rehydrated directory's children.
    ListFiles(list_files::ListFiles),
    /// Re-execute one recorded tool call and report whether it matches.
    Replay(replay::Replay),
}

impl Command {
    pub async fn run(&self) -> Result<()> {
        match self {
            Command::Rehydrate(cmd) => {
                tracing::info!("rehydrating session");
                cmd.run().await
            }
            Command::ListFiles(cmd) => {
                tracing::info!("listing files");
                cmd.run().await
            }
            Command::Replay(cmd) => {
                tracing::info!("replaying tool call");
                cmd.run().await
            }
        }
    }
}
