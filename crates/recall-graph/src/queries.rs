//! The three Cypher templates named in §6. Kept as named constants so
//! `GraphStore::query` callers and in-memory test doubles reference the
//! exact same literal text the wire collaborator would be sent.

/// `snapshot_at`, `vt_start`/`vt_end`, `tt_end` filtered, newest first, one row.
pub const SNAPSHOT_LOOKUP: &str = "MATCH (s:Snapshot)-[:SNAPSHOT_OF]->(sess:Session {id:$sessionId}) \
WHERE s.snapshot_at <= $t AND s.vt_start <= $t AND s.vt_end > $t AND s.tt_end = 253402300799000 \
RETURN s.vfs_state_blob_ref, s.snapshot_at ORDER BY s.snapshot_at DESC LIMIT 1";

/// Session → Thought → (NEXT*) → Thought → ToolCall → DiffHunk, `vt_start`
/// in `(lastSnapshotTime, targetTime]`, ascending.
pub const DIFF_FETCH: &str = "MATCH (sess:Session {id:$sessionId})-[:HAS_THOUGHT]->(:Thought)-[:NEXT*0..]->(t:Thought)\
-[:HAS_TOOL_CALL]->(:ToolCall)-[:HAS_DIFF]->(d:DiffHunk) \
WHERE d.vt_start > $lastSnapshotTime AND d.vt_start <= $targetTime \
RETURN d.id, d.file_path, d.patch_content, d.vt_start ORDER BY d.vt_start ASC";

/// Session → Thought → (NEXT*) → Thought → ToolCall, by id.
pub const TOOL_CALL_FETCH: &str = "MATCH (sess:Session {id:$sessionId})-[:HAS_THOUGHT]->(:Thought)-[:NEXT*0..]->(t:Thought)\
-[:HAS_TOOL_CALL]->(c:ToolCall {id:$eventId}) \
RETURN c.id, c.name, c.arguments, c.result, c.vt_start";
