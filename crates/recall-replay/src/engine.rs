use recall_blob::BlobStore;
use recall_core::RecallError;
use recall_core::SessionId;
use recall_core::Timestamp;
use recall_core::ToolCallId;
use recall_graph::GraphStore;
use recall_rehydrate::Rehydrator;
use serde_json::Value;

use crate::compare::canonical_eq;
use crate::dispatch::execute;
use crate::report::ReplayReport;

/// Deterministically re-executes one recorded tool call against its
/// rehydrated pre-state (§4.5).
pub struct ReplayEngine<G, B> {
    graph: G,
    rehydrator: Rehydrator<G, B>,
}

impl<G, B> ReplayEngine<G, B>
where
    G: GraphStore + Clone,
    B: BlobStore,
{
    pub fn new(graph: G, blob: B) -> Self {
        Self {
            rehydrator: Rehydrator::new(graph.clone(), blob),
            graph,
        }
    }

    /// Read-only and idempotent: the VFS it builds is discarded, and
    /// neither the Graph nor Blob store is ever written to.
    ///
    /// Transient Graph I/O failures while fetching the `ToolCall` row
    /// propagate as `Err` per §7; every other failure on the state
    /// machine's path (no such event, fatal rehydration, tool-dispatch
    /// exception) is captured as a non-`success` [`ReplayReport`].
    pub async fn replay(
        &self,
        session_id: SessionId,
        event_id: ToolCallId,
    ) -> Result<ReplayReport, RecallError> {
        let Some(tool_call) = self.graph.tool_call(session_id, event_id).await? else {
            return Ok(ReplayReport::failure(format!(
                "NotFound: no ToolCall {event_id} in session {session_id}"
            )));
        };

        let arguments: Value = match serde_json::from_str(&tool_call.arguments) {
            Ok(v) => v,
            Err(e) => return Ok(ReplayReport::failure(format!("malformed arguments: {e}"))),
        };

        let original_output: Option<Value> = match &tool_call.result {
            None => None,
            Some(raw) => match serde_json::from_str(raw) {
                Ok(v) => Some(v),
                Err(e) => return Ok(ReplayReport::failure(format!("malformed result: {e}"))),
            },
        };

        // -1ms: the state just before this call, so any diff it produced
        // is not yet applied (§4.5 step 3).
        let pre_state = Timestamp::from_millis(tool_call.vt_start).saturating_pred();
        let mut vfs = match self.rehydrator.rehydrate(session_id, pre_state).await {
            Ok(vfs) => vfs,
            Err(e) => return Ok(ReplayReport::failure(format!("rehydration failed: {e}"))),
        };

        let replay_output = match execute(&mut vfs, &tool_call.name, &arguments) {
            Ok(v) => v,
            Err(e) => {
                return Ok(ReplayReport::execution_failure(
                    original_output,
                    e.to_string(),
                ))
            }
        };

        let matches = canonical_eq(original_output.as_ref(), Some(&replay_output));
        Ok(ReplayReport {
            success: true,
            matches,
            original_output,
            replay_output: Some(replay_output),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use recall_blob::InMemoryBlobStore;
    use recall_core::DiffHunkId;
    use recall_graph::memory::SeedToolCall;
    use recall_graph::InMemoryGraphStore;
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn scenario_d_replay_match() {
        let graph = Arc::new(InMemoryGraphStore::new());
        let blob = InMemoryBlobStore::new();
        let session_id = SessionId::generate();
        let event_id = ToolCallId::generate();

        graph.seed_tool_call(SeedToolCall {
            id: event_id,
            session_id,
            name: "write_file".into(),
            arguments: r#"{"path":"/n.txt","content":"test"}"#.into(),
            result: Some(r#"{"success":true}"#.into()),
            vt_start: 1000,
        });

        let engine = ReplayEngine::new(graph, blob);
        let report = engine.replay(session_id, event_id).await.unwrap();
        assert!(report.success);
        assert!(report.matches);
    }

    #[tokio::test]
    async fn scenario_e_replay_mismatch() {
        let graph = Arc::new(InMemoryGraphStore::new());
        let blob = InMemoryBlobStore::new();
        let session_id = SessionId::generate();
        let event_id = ToolCallId::generate();

        graph.seed_tool_call(SeedToolCall {
            id: event_id,
            session_id,
            name: "write_file".into(),
            arguments: r#"{"path":"/n.txt","content":"test"}"#.into(),
            result: Some(r#"{"success":false}"#.into()),
            vt_start: 1000,
        });

        let engine = ReplayEngine::new(graph, blob);
        let report = engine.replay(session_id, event_id).await.unwrap();
        assert!(report.success);
        assert!(!report.matches);
        assert!(report.original_output.is_some());
        assert!(report.replay_output.is_some());
    }

    #[tokio::test]
    async fn missing_tool_call_is_reported_not_erred() {
        let graph = Arc::new(InMemoryGraphStore::new());
        let blob = InMemoryBlobStore::new();

        let engine = ReplayEngine::new(graph, blob);
        let report = engine
            .replay(SessionId::generate(), ToolCallId::generate())
            .await
            .unwrap();
        assert!(!report.success);
        assert!(report.error.unwrap().contains("NotFound"));
    }

    #[tokio::test]
    async fn replay_is_idempotent() {
        let graph = Arc::new(InMemoryGraphStore::new());
        let blob = InMemoryBlobStore::new();
        let session_id = SessionId::generate();
        let event_id = ToolCallId::generate();

        graph.seed_tool_call(SeedToolCall {
            id: event_id,
            session_id,
            name: "read_file".into(),
            arguments: r#"{"path":"/a.txt"}"#.into(),
            result: None,
            vt_start: 1000,
        });
        graph.seed_diff_hunk(recall_graph::memory::SeedDiffHunk {
            id: DiffHunkId::generate(),
            session_id,
            file_path: "/a.txt".into(),
            patch_content: "--- /dev/null\n+++ b/a.txt\n@@ -0,0 +1,1 @@\n+hi\n".into(),
            vt_start: 500,
        });

        let engine = ReplayEngine::new(graph, blob);
        let first = engine.replay(session_id, event_id).await.unwrap();
        let second = engine.replay(session_id, event_id).await.unwrap();
        assert_eq!(first, second);
    }
}
