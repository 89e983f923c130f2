use anyhow::Context;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use recall_core::SessionId;
use recall_core::ToolCallId;
use recall_replay::ReplayEngine;

use crate::fixture;

/// Re-execute one recorded tool call and report whether it matches
/// (§4.5).
#[derive(Debug, Parser)]
pub struct Replay {
    /// Path to a JSON fixture seeding the in-memory Graph and Blob stores.
    #[arg(long)]
    fixture: Utf8PathBuf,

    /// Session ULID the tool call belongs to.
    #[arg(long)]
    session: String,

    /// ToolCall ULID to replay.
    #[arg(long)]
    event: String,
}

impl Replay {
    pub async fn run(&self) -> Result<()> {
        let loaded = fixture::load(&self.fixture)?;
        let session_id: SessionId = self
            .session
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid session id '{}'", self.session))?;
        let event_id: ToolCallId = self
            .event
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid event id '{}'", self.event))?;

        let engine = ReplayEngine::new(loaded.graph, loaded.blob);
        let report = engine
            .replay(session_id, event_id)
            .await
            .context("replay could not be attempted")?;

        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
