use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use clap::Parser;
use recall_core::SessionId;
use recall_core::Timestamp;
use recall_rehydrate::TimeTravelService;

use crate::fixture;

/// List a rehydrated directory's children (§4.4 `listFiles`).
#[derive(Debug, Parser)]
pub struct ListFiles {
    /// Path to a JSON fixture seeding the in-memory Graph and Blob stores.
    #[arg(long)]
    fixture: Utf8PathBuf,

    /// Session ULID to rehydrate.
    #[arg(long)]
    session: String,

    /// Target time, epoch milliseconds.
    #[arg(long)]
    at: i64,

    /// Directory to list. An absent directory yields an empty list, not an
    /// error (§4.4).
    #[arg(long, default_value = "/")]
    path: Utf8PathBuf,
}

impl ListFiles {
    pub async fn run(&self) -> Result<()> {
        let loaded = fixture::load(&self.fixture)?;
        let session_id: SessionId = self
            .session
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid session id '{}'", self.session))?;

        let service = TimeTravelService::new(loaded.graph, loaded.blob);
        let entries = service
            .list_files(
                session_id,
                Timestamp::from_millis(self.at),
                Utf8Path::new(self.path.as_str()),
            )
            .await
            .context("list-files failed")?;

        println!("{}", serde_json::to_string_pretty(&entries)?);
        Ok(())
    }
}
