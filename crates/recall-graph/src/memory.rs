use std::sync::RwLock;

use async_trait::async_trait;
use recall_core::DiffHunkId;
use recall_core::RecallError;
use recall_core::SessionId;
use recall_core::ToolCallId;

use crate::queries;
use crate::GraphStore;

/// A seeded snapshot row, carrying the bitemporal fields the lookup
/// query filters on (§4.3 step 2).
#[derive(Clone, Debug)]
pub struct SeedSnapshot {
    pub session_id: SessionId,
    pub vfs_state_blob_ref: String,
    pub snapshot_at: i64,
    pub vt_start: i64,
    pub vt_end: i64,
    pub tt_end: i64,
}

#[derive(Clone, Debug)]
pub struct SeedDiffHunk {
    pub id: DiffHunkId,
    pub session_id: SessionId,
    pub file_path: String,
    pub patch_content: String,
    pub vt_start: i64,
}

#[derive(Clone, Debug)]
pub struct SeedToolCall {
    pub id: ToolCallId,
    pub session_id: SessionId,
    pub name: String,
    pub arguments: String,
    pub result: Option<String>,
    pub vt_start: i64,
}

/// An in-memory stand-in for a real graph database, used by tests across
/// crates and by `recall-cli`'s fixture loader.
///
/// `query` dispatches on the literal Cypher text in [`crate::queries`]
/// rather than actually interpreting Cypher, the same way
/// `djls-workspace`'s `InMemoryFileSystem` test double answers
/// `FileSystem` calls from a plain in-memory map instead of touching
/// disk.
#[derive(Default)]
pub struct InMemoryGraphStore {
    inner: RwLock<Seeded>,
}

#[derive(Default)]
struct Seeded {
    snapshots: Vec<SeedSnapshot>,
    diff_hunks: Vec<SeedDiffHunk>,
    tool_calls: Vec<SeedToolCall>,
}

impl InMemoryGraphStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_snapshot(&self, snapshot: SeedSnapshot) {
        self.inner.write().unwrap().snapshots.push(snapshot);
    }

    pub fn seed_diff_hunk(&self, hunk: SeedDiffHunk) {
        self.inner.write().unwrap().diff_hunks.push(hunk);
    }

    pub fn seed_tool_call(&self, tool_call: SeedToolCall) {
        self.inner.write().unwrap().tool_calls.push(tool_call);
    }
}

fn param_str(params: &serde_json::Value, name: &str) -> Result<String, RecallError> {
    params
        .get(name)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RecallError::GraphStore(format!("missing parameter '{name}'")))
}

fn param_i64(params: &serde_json::Value, name: &str) -> Result<i64, RecallError> {
    params
        .get(name)
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| RecallError::GraphStore(format!("missing parameter '{name}'")))
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn query(
        &self,
        cypher: &str,
        params: serde_json::Value,
    ) -> Result<Vec<serde_json::Value>, RecallError> {
        let seeded = self.inner.read().unwrap();

        if cypher == queries::SNAPSHOT_LOOKUP {
            let session_id = param_str(&params, "sessionId")?;
            let t = param_i64(&params, "t")?;
            let mut matching: Vec<&SeedSnapshot> = seeded
                .snapshots
                .iter()
                .filter(|s| {
                    s.session_id.to_string() == session_id
                        && s.snapshot_at <= t
                        && s.vt_start <= t
                        && s.vt_end > t
                        && s.tt_end == recall_core::MAX_DATE.millis()
                })
                .collect();
            matching.sort_by_key(|s| std::cmp::Reverse(s.snapshot_at));
            return Ok(matching
                .into_iter()
                .take(1)
                .map(|s| {
                    serde_json::json!({
                        "vfs_state_blob_ref": s.vfs_state_blob_ref,
                        "snapshot_at": s.snapshot_at,
                    })
                })
                .collect());
        }

        if cypher == queries::DIFF_FETCH {
            let session_id = param_str(&params, "sessionId")?;
            let last_snapshot_time = param_i64(&params, "lastSnapshotTime")?;
            let target_time = param_i64(&params, "targetTime")?;
            let mut matching: Vec<&SeedDiffHunk> = seeded
                .diff_hunks
                .iter()
                .filter(|d| {
                    d.session_id.to_string() == session_id
                        && d.vt_start > last_snapshot_time
                        && d.vt_start <= target_time
                })
                .collect();
            matching.sort_by(|a, b| a.vt_start.cmp(&b.vt_start).then_with(|| a.id.cmp(&b.id)));
            return Ok(matching
                .into_iter()
                .map(|d| {
                    serde_json::json!({
                        "id": d.id.to_string(),
                        "file_path": d.file_path,
                        "patch_content": d.patch_content,
                        "vt_start": d.vt_start,
                    })
                })
                .collect());
        }

        if cypher == queries::TOOL_CALL_FETCH {
            let session_id = param_str(&params, "sessionId")?;
            let event_id = param_str(&params, "eventId")?;
            return Ok(seeded
                .tool_calls
                .iter()
                .filter(|c| c.session_id.to_string() == session_id && c.id.to_string() == event_id)
                .take(1)
                .map(|c| {
                    serde_json::json!({
                        "id": c.id.to_string(),
                        "name": c.name,
                        "arguments": c.arguments,
                        "result": c.result,
                        "vt_start": c.vt_start,
                    })
                })
                .collect());
        }

        Err(RecallError::GraphStore(format!(
            "no seeded handler for query: {cypher}"
        )))
    }
}
