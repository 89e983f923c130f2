//! End-to-end rehydration scenarios spanning Graph Store, Blob Store, VFS
//! and Patch Manager together (§8 scenarios C and F), exercised
//! through `recall-rehydrate`'s public API rather than its internals.

use camino::Utf8Path;
use recall_blob::InMemoryBlobStore;
use recall_core::DiffHunkId;
use recall_core::SessionId;
use recall_core::Timestamp;
use recall_core::MAX_DATE;
use recall_graph::memory::SeedDiffHunk;
use recall_graph::memory::SeedSnapshot;
use recall_graph::InMemoryGraphStore;
use recall_rehydrate::Rehydrator;
use recall_vfs::Vfs;

fn p(s: &str) -> &Utf8Path {
    Utf8Path::new(s)
}

#[tokio::test]
async fn scenario_c_rehydrate_without_snapshot_applies_both_diffs() {
    let graph = InMemoryGraphStore::new();
    let blob = InMemoryBlobStore::new();
    let session_id = SessionId::generate();

    graph.seed_diff_hunk(SeedDiffHunk {
        id: DiffHunkId::generate(),
        session_id,
        file_path: "/x.txt".into(),
        patch_content: "--- /dev/null\n+++ b/x.txt\n@@ -0,0 +1,1 @@\n+h\n".into(),
        vt_start: 1000,
    });
    graph.seed_diff_hunk(SeedDiffHunk {
        id: DiffHunkId::generate(),
        session_id,
        file_path: "/x.txt".into(),
        patch_content: "@@ -1,1 +1,1 @@\n-h\n+hi\n".into(),
        vt_start: 2000,
    });

    let rehydrator = Rehydrator::new(graph, blob);
    let vfs = rehydrator
        .rehydrate(session_id, Timestamp::from_millis(3000))
        .await
        .unwrap();

    assert_eq!(vfs.walk().len(), 1);
    assert_eq!(&*vfs.read_file(p("/x.txt")).unwrap(), "hi");
}

#[tokio::test]
async fn scenario_f_one_stale_hunk_among_three_does_not_fail_the_whole_rehydration() {
    let graph = InMemoryGraphStore::new();
    let blob = InMemoryBlobStore::new();
    let session_id = SessionId::generate();

    let mut seed_vfs = Vfs::new();
    seed_vfs.write_file(p("/a.txt"), "one\n").unwrap();
    let blob_ref = "snap-1".to_string();
    blob.seed(blob_ref.clone(), seed_vfs.create_snapshot().unwrap());
    graph.seed_snapshot(SeedSnapshot {
        session_id,
        vfs_state_blob_ref: blob_ref,
        snapshot_at: 500,
        vt_start: 0,
        vt_end: MAX_DATE.millis(),
        tt_end: MAX_DATE.millis(),
    });

    graph.seed_diff_hunk(SeedDiffHunk {
        id: DiffHunkId::generate(),
        session_id,
        file_path: "/a.txt".into(),
        patch_content: "@@ -1,1 +1,1 @@\n-one\n+first\n".into(),
        vt_start: 1000,
    });
    graph.seed_diff_hunk(SeedDiffHunk {
        id: DiffHunkId::generate(),
        session_id,
        file_path: "/a.txt".into(),
        patch_content: "@@ -1,1 +1,1 @@\n-stale context\n+second\n".into(),
        vt_start: 1500,
    });
    graph.seed_diff_hunk(SeedDiffHunk {
        id: DiffHunkId::generate(),
        session_id,
        file_path: "/a.txt".into(),
        patch_content: "@@ -1,1 +1,1 @@\n-first\n+third\n".into(),
        vt_start: 2000,
    });

    let rehydrator = Rehydrator::new(graph, blob);
    let vfs = rehydrator
        .rehydrate(session_id, Timestamp::from_millis(3000))
        .await
        .unwrap();

    assert_eq!(&*vfs.read_file(p("/a.txt")).unwrap(), "third\n");
}
