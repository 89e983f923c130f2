use camino::Utf8Path;
use recall_blob::BlobStore;
use recall_core::RecallError;
use recall_core::SessionId;
use recall_core::Timestamp;
use recall_graph::GraphStore;
use recall_vfs::Vfs;

use crate::Rehydrator;

/// Thin facade over [`Rehydrator`] (§4.4); the only caller-facing
/// surface most consumers need.
pub struct TimeTravelService<G, B> {
    rehydrator: Rehydrator<G, B>,
}

impl<G, B> TimeTravelService<G, B>
where
    G: GraphStore,
    B: BlobStore,
{
    pub fn new(graph: G, blob: B) -> Self {
        Self {
            rehydrator: Rehydrator::new(graph, blob),
        }
    }

    pub async fn get_filesystem_state(
        &self,
        session_id: SessionId,
        t: Timestamp,
    ) -> Result<Vfs, RecallError> {
        self.rehydrator.rehydrate(session_id, t).await
    }

    /// `rehydrate(...).createSnapshot()` — gzipped JSON per §4.1.
    pub async fn get_zipped_state(
        &self,
        session_id: SessionId,
        t: Timestamp,
    ) -> Result<Vec<u8>, RecallError> {
        let vfs = self.rehydrator.rehydrate(session_id, t).await?;
        vfs.create_snapshot()
    }

    /// `readDir(path)`, but `NotFound` is suppressed into an empty
    /// sequence; every other VFS error still propagates (§4.4).
    pub async fn list_files(
        &self,
        session_id: SessionId,
        t: Timestamp,
        path: &Utf8Path,
    ) -> Result<Vec<String>, RecallError> {
        let vfs = self.rehydrator.rehydrate(session_id, t).await?;
        match vfs.read_dir(path) {
            Ok(entries) => Ok(entries),
            Err(e) if e.tag() == "NotFound" => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use recall_blob::InMemoryBlobStore;
    use recall_graph::InMemoryGraphStore;

    use super::*;

    #[tokio::test]
    async fn list_files_on_missing_directory_is_empty_not_an_error() {
        let graph = InMemoryGraphStore::new();
        let blob = InMemoryBlobStore::new();
        let service = TimeTravelService::new(graph, blob);

        let entries = service
            .list_files(
                recall_core::SessionId::generate(),
                Timestamp::from_millis(1000),
                Utf8Path::new("/nope"),
            )
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn list_files_on_root_lists_top_level_children() {
        let graph = InMemoryGraphStore::new();
        let blob = InMemoryBlobStore::new();
        let session_id = recall_core::SessionId::generate();

        graph.seed_diff_hunk(recall_graph::memory::SeedDiffHunk {
            id: recall_core::DiffHunkId::generate(),
            session_id,
            file_path: "/a.txt".into(),
            patch_content: "--- /dev/null\n+++ b/a.txt\n@@ -0,0 +1,1 @@\n+hi\n".into(),
            vt_start: 1000,
        });

        let service = TimeTravelService::new(graph, blob);
        let entries = service
            .list_files(session_id, Timestamp::from_millis(2000), Utf8Path::new("/"))
            .await
            .unwrap();
        assert_eq!(entries, vec!["a.txt".to_string()]);
    }
}
