use serde::Deserialize;
use serde::Serialize;

use crate::ids::DiffHunkId;
use crate::ids::SessionId;
use crate::ids::ThoughtId;
use crate::ids::ToolCallId;
use crate::time::Timestamp;

/// The four bitemporal fields present on every persistent entity (§3).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Bitemporal {
    pub vt_start: Timestamp,
    pub vt_end: Timestamp,
    pub tt_start: Timestamp,
    pub tt_end: Timestamp,
}

impl Bitemporal {
    /// Construct an interval that opens at `vt_start`/`tt_start` and never closes.
    #[must_use]
    pub fn open_at(vt_start: Timestamp, tt_start: Timestamp) -> Self {
        Self {
            vt_start,
            vt_end: Timestamp::MAX_DATE,
            tt_start,
            tt_end: Timestamp::MAX_DATE,
        }
    }

    /// Invariant I1: a record is active at `t` iff its valid-time interval
    /// contains `t` and its transaction-time interval contains `now`.
    #[must_use]
    pub fn is_active_at(&self, t: Timestamp, now: Timestamp) -> bool {
        self.vt_start <= t && t < self.vt_end && self.tt_start <= now && now < self.tt_end
    }
}

/// Root of one agent session's history. Identified by a ULID.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
}

/// Sequential reasoning unit, chained by a `NEXT` relation inside one session.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Thought {
    pub id: ThoughtId,
    pub session_id: SessionId,
    /// The next thought in the chain, if any (the `NEXT` relation).
    pub next: Option<ThoughtId>,
}

/// A recorded invocation of a named tool by the agent.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: ToolCallId,
    pub thought_id: ThoughtId,
    pub name: String,
    /// JSON text, as recorded. Parsed lazily by the replay engine.
    pub arguments: String,
    /// JSON text, or `None` if no result was recorded.
    pub result: Option<String>,
    pub vt_start: Timestamp,
}

/// One `@@ ... @@` unified-diff hunk block (plus context) applied to a file.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct DiffHunk {
    pub id: DiffHunkId,
    pub tool_call_id: ToolCallId,
    /// Absolute path, beginning with `/`.
    pub file_path: String,
    pub patch_content: String,
    pub vt_start: Timestamp,
}

/// Opaque Blob Store key.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(pub String);

impl BlobRef {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlobRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A self-contained byte encoding of a VFS at an instant, linked to its
/// session by the `SNAPSHOT_OF` edge.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub session_id: SessionId,
    pub snapshot_at: Timestamp,
    pub vfs_state_blob_ref: BlobRef,
    pub bitemporal: Bitemporal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitemporal_active_respects_both_intervals() {
        let b = Bitemporal {
            vt_start: Timestamp::from_millis(100),
            vt_end: Timestamp::from_millis(200),
            tt_start: Timestamp::from_millis(0),
            tt_end: Timestamp::MAX_DATE,
        };
        assert!(b.is_active_at(Timestamp::from_millis(150), Timestamp::from_millis(9999)));
        assert!(!b.is_active_at(Timestamp::from_millis(50), Timestamp::from_millis(9999)));
        assert!(!b.is_active_at(Timestamp::from_millis(200), Timestamp::from_millis(9999)));
    }

    #[test]
    fn open_at_never_closes() {
        let b = Bitemporal::open_at(Timestamp::from_millis(5), Timestamp::from_millis(5));
        assert_eq!(b.vt_end, Timestamp::MAX_DATE);
        assert_eq!(b.tt_end, Timestamp::MAX_DATE);
    }
}
