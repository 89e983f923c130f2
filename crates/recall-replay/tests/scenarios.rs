//! End-to-end replay scenarios spanning Graph Store, Blob Store,
//! rehydration and tool dispatch together (§8 scenarios D and E),
//! exercised through `recall-replay`'s public API rather than its
//! internals.

use std::sync::Arc;

use recall_blob::InMemoryBlobStore;
use recall_core::SessionId;
use recall_core::ToolCallId;
use recall_graph::memory::SeedToolCall;
use recall_graph::InMemoryGraphStore;
use recall_replay::ReplayEngine;

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
async fn scenario_e_replay_mismatch_both_outputs_populated() {
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
    assert_eq!(
        report.original_output.unwrap(),
        serde_json::json!({"success": false})
    );
    assert_eq!(
        report.replay_output.unwrap(),
        serde_json::json!({"success": true})
    );
}
