use std::sync::Arc;

use async_trait::async_trait;
use recall_core::RecallError;
use recall_core::SessionId;
use recall_core::Timestamp;
use recall_core::ToolCallId;

use crate::queries;
use crate::rows::DiffHunkRow;
use crate::rows::SnapshotRow;
use crate::rows::ToolCallRow;

/// The single collaborator operation from §6: parameterized,
/// Cypher-like queries returning row-shaped JSON. Every other method on
/// this trait is a typed wrapper around one of the three named templates
/// in [`crate::queries`] and has a default implementation in terms of
/// `query`, so implementors only need to provide `query` itself.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn query(
        &self,
        cypher: &str,
        params: serde_json::Value,
    ) -> Result<Vec<serde_json::Value>, RecallError>;

    /// The latest valid snapshot for `session_id` with `snapshot_at <= t`
    /// (§4.3 step 2).
    async fn latest_snapshot(
        &self,
        session_id: SessionId,
        t: Timestamp,
    ) -> Result<Option<SnapshotRow>, RecallError> {
        let params = serde_json::json!({
            "sessionId": session_id.to_string(),
            "t": t.millis(),
        });
        let rows = self.query(queries::SNAPSHOT_LOOKUP, params).await?;
        rows.first().map(SnapshotRow::from_value).transpose()
    }

    /// Every `DiffHunk` with `vt_start` in `(last_snapshot_time, target_time]`,
    /// ascending (§4.3 step 4). Tie-breaking by ULID is the caller's
    /// responsibility (the rows here are not re-sorted on id).
    async fn diff_hunks(
        &self,
        session_id: SessionId,
        last_snapshot_time: Timestamp,
        target_time: Timestamp,
    ) -> Result<Vec<DiffHunkRow>, RecallError> {
        let params = serde_json::json!({
            "sessionId": session_id.to_string(),
            "lastSnapshotTime": last_snapshot_time.millis(),
            "targetTime": target_time.millis(),
        });
        let rows = self.query(queries::DIFF_FETCH, params).await?;
        rows.iter().map(DiffHunkRow::from_value).collect()
    }

    /// The `ToolCall` row for `(session_id, event_id)` (§4.5 step 1).
    async fn tool_call(
        &self,
        session_id: SessionId,
        event_id: ToolCallId,
    ) -> Result<Option<ToolCallRow>, RecallError> {
        let params = serde_json::json!({
            "sessionId": session_id.to_string(),
            "eventId": event_id.to_string(),
        });
        let rows = self.query(queries::TOOL_CALL_FETCH, params).await?;
        rows.first().map(ToolCallRow::from_value).transpose()
    }
}

/// Lets collaborators share one store behind an `Arc` (as `ReplayEngine`
/// does, holding both a `Rehydrator` and its own fetch handle) without
/// re-implementing the trait.
#[async_trait]
impl<T: GraphStore + ?Sized> GraphStore for Arc<T> {
    async fn query(
        &self,
        cypher: &str,
        params: serde_json::Value,
    ) -> Result<Vec<serde_json::Value>, RecallError> {
        (**self).query(cypher, params).await
    }
}
