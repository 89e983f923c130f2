use anyhow::Context;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use recall_core::SessionId;
use recall_core::Timestamp;
use recall_rehydrate::TimeTravelService;
use serde_json::Map;
use serde_json::Value;

use crate::fixture;

/// Rehydrate a session to a point in time and print the resulting tree.
#[derive(Debug, Parser)]
pub struct Rehydrate {
    /// Path to a JSON fixture seeding the in-memory Graph and Blob stores.
    #[arg(long)]
    fixture: Utf8PathBuf,

    /// Session ULID to rehydrate.
    #[arg(long)]
    session: String,

    /// Target time, epoch milliseconds.
    #[arg(long)]
    at: i64,
}

impl Rehydrate {
    pub async fn run(&self) -> Result<()> {
        let loaded = fixture::load(&self.fixture)?;
        let session_id: SessionId = self
            .session
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid session id '{}'", self.session))?;

        let service = TimeTravelService::new(loaded.graph, loaded.blob);
        let vfs = service
            .get_filesystem_state(session_id, Timestamp::from_millis(self.at))
            .await
            .context("rehydration failed")?;

        let mut tree = Map::new();
        for (path, content) in vfs.walk() {
            tree.insert(path, Value::String(content.to_string()));
        }
        println!("{}", serde_json::to_string_pretty(&Value::Object(tree))?);
        Ok(())
    }
}
