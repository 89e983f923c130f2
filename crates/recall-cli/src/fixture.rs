//! Loads a JSON fixture file into a freshly seeded in-memory Graph Store
//! and Blob Store pair, the same collaborator shapes `recall-rehydrate`
//! and `recall-replay` consume in production, standing in for a real
//! Cypher-speaking graph database and blob service.
//!
//! Fixture shape:
//!
//! ```json
//! {
//!   "tool_calls": [
//!     {"id": "...", "session_id": "...", "name": "write_file",
//!      "arguments": {"path": "/a.txt", "content": "hi"},
//!      "result": {"success": true}, "vt_start": 1000}
//!   ],
//!   "diff_hunks": [
//!     {"id": "...", "session_id": "...", "file_path": "/a.txt",
//!      "patch_content": "--- /dev/null\n+++ b/a.txt\n@@ -0,0 +1,1 @@\n+hi\n",
//!      "vt_start": 500}
//!   ],
//!   "snapshots": [
//!     {"session_id": "...", "blob_ref": "snap-1", "snapshot_at": 0,
//!      "tree": {"a.txt": "hi", "sub": {"b.txt": "there"}}}
//!   ]
//! }
//! ```
//!
//! `tree` is the same directory-object shape the VFS itself encodes to
//! (§4.1): the fixture loader builds a scratch [`Vfs`] from it and
//! seeds the Blob Store with that `Vfs`'s own `create_snapshot()` output,
//! so a fixture never needs to hand-author gzip bytes.

use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use recall_blob::InMemoryBlobStore;
use recall_core::MAX_DATE;
use recall_graph::memory::SeedDiffHunk;
use recall_graph::memory::SeedSnapshot;
use recall_graph::memory::SeedToolCall;
use recall_graph::InMemoryGraphStore;
use recall_vfs::Vfs;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    tool_calls: Vec<FixtureToolCall>,
    #[serde(default)]
    diff_hunks: Vec<FixtureDiffHunk>,
    #[serde(default)]
    snapshots: Vec<FixtureSnapshot>,
}

#[derive(Debug, Deserialize)]
struct FixtureToolCall {
    id: String,
    session_id: String,
    name: String,
    arguments: Value,
    #[serde(default)]
    result: Option<Value>,
    vt_start: i64,
}

#[derive(Debug, Deserialize)]
struct FixtureDiffHunk {
    id: String,
    session_id: String,
    file_path: String,
    patch_content: String,
    vt_start: i64,
}

#[derive(Debug, Deserialize)]
struct FixtureSnapshot {
    session_id: String,
    blob_ref: String,
    snapshot_at: i64,
    #[serde(default)]
    vt_start: i64,
    vt_end: Option<i64>,
    tt_end: Option<i64>,
    tree: Value,
}

/// The seeded collaborator pair a subcommand hands to `recall-rehydrate`
/// or `recall-replay`. `Arc`-wrapped so it can be cloned the way
/// `ReplayEngine` requires of its `GraphStore` handle.
pub struct Fixture {
    pub graph: Arc<InMemoryGraphStore>,
    pub blob: Arc<InMemoryBlobStore>,
}

pub fn load(path: &Utf8Path) -> Result<Fixture> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture file {path}"))?;
    let parsed: FixtureFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse fixture file {path}"))?;

    let graph = Arc::new(InMemoryGraphStore::new());
    let blob = Arc::new(InMemoryBlobStore::new());

    for tc in parsed.tool_calls {
        graph.seed_tool_call(SeedToolCall {
            id: tc
                .id
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid ToolCall id '{}'", tc.id))?,
            session_id: tc
                .session_id
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid session id '{}'", tc.session_id))?,
            name: tc.name,
            arguments: serde_json::to_string(&tc.arguments)?,
            result: tc.result.map(|r| serde_json::to_string(&r)).transpose()?,
            vt_start: tc.vt_start,
        });
    }

    for d in parsed.diff_hunks {
        graph.seed_diff_hunk(SeedDiffHunk {
            id: d
                .id
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid DiffHunk id '{}'", d.id))?,
            session_id: d
                .session_id
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid session id '{}'", d.session_id))?,
            file_path: d.file_path,
            patch_content: d.patch_content,
            vt_start: d.vt_start,
        });
    }

    for s in parsed.snapshots {
        let mut scratch = Vfs::new();
        write_tree(&mut scratch, "", &s.tree)?;
        let bytes = scratch
            .create_snapshot()
            .context("failed to encode fixture snapshot tree")?;
        blob.seed(s.blob_ref.clone(), bytes);

        graph.seed_snapshot(SeedSnapshot {
            session_id: s
                .session_id
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid session id '{}'", s.session_id))?,
            vfs_state_blob_ref: s.blob_ref,
            snapshot_at: s.snapshot_at,
            vt_start: s.vt_start,
            vt_end: s.vt_end.unwrap_or_else(|| MAX_DATE.millis()),
            tt_end: s.tt_end.unwrap_or_else(|| MAX_DATE.millis()),
        });
    }

    Ok(Fixture { graph, blob })
}

fn write_tree(vfs: &mut Vfs, prefix: &str, tree: &Value) -> Result<()> {
    let obj = tree
        .as_object()
        .context("fixture snapshot 'tree' must be a JSON object")?;

    for (name, value) in obj {
        let child_path = format!("{prefix}/{name}");
        match value {
            Value::String(content) => {
                vfs.write_file(Utf8Path::new(&child_path), content)
                    .with_context(|| format!("failed to write fixture file {child_path}"))?;
            }
            Value::Object(_) => {
                vfs.mkdir(Utf8Path::new(&child_path))
                    .with_context(|| format!("failed to create fixture directory {child_path}"))?;
                write_tree(vfs, &child_path, value)?;
            }
            other => {
                anyhow::bail!("unexpected value in fixture tree at '{child_path}': {other}")
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    fn write_fixture(contents: &str) -> NamedTempFile {
        use std::io::Write;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_tool_calls_diff_hunks_and_snapshots() {
        use recall_blob::BlobStore;
        use recall_graph::GraphStore;
        use recall_core::SessionId;
        use recall_core::ToolCallId;

        let file = write_fixture(
            r#"{
                "tool_calls": [
                    {"id": "01ARZ3NDEKTSV4RRFFQ69G5FAV", "session_id": "01ARZ3NDEKTSV4RRFFQ69G5FAW",
                     "name": "read_file", "arguments": {"path": "/a.txt"}, "result": null, "vt_start": 1000}
                ],
                "diff_hunks": [
                    {"id": "01ARZ3NDEKTSV4RRFFQ69G5FAX", "session_id": "01ARZ3NDEKTSV4RRFFQ69G5FAW",
                     "file_path": "/b.txt",
                     "patch_content": "--- /dev/null\n+++ b/b.txt\n@@ -0,0 +1,1 @@\n+hi\n",
                     "vt_start": 500}
                ],
                "snapshots": [
                    {"session_id": "01ARZ3NDEKTSV4RRFFQ69G5FAW", "blob_ref": "snap-1",
                     "snapshot_at": 0, "tree": {"c.txt": "seeded"}}
                ]
            }"#,
        );

        let loaded = load(Utf8Path::from_path(file.path()).unwrap()).unwrap();

        let blob_bytes = loaded.blob.load("snap-1").await.unwrap();
        let mut vfs = Vfs::new();
        vfs.load_snapshot(&blob_bytes).unwrap();
        assert_eq!(&*vfs.read_file(Utf8Path::new("/c.txt")).unwrap(), "seeded");

        let session_id: SessionId = "01ARZ3NDEKTSV4RRFFQ69G5FAW".parse().unwrap();
        let tool_call = loaded
            .graph
            .tool_call(
                session_id,
                "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse::<ToolCallId>().unwrap(),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tool_call.name, "read_file");

        let hunks = loaded
            .graph
            .diff_hunks(
                session_id,
                recall_core::Timestamp::from_millis(0),
                recall_core::Timestamp::from_millis(1000),
            )
            .await
            .unwrap();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].file_path, "/b.txt");
    }
}
