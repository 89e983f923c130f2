use camino::Utf8Path;
use recall_blob::BlobStore;
use recall_core::RecallError;
use recall_core::SessionId;
use recall_core::Timestamp;
use recall_graph::GraphStore;
use recall_vfs::Vfs;

/// Bitemporal state reconstruction (§4.3): snapshot-then-forward-replay.
///
/// Stateless beyond its collaborator handles; safe to invoke concurrently
/// for distinct `(sessionId, targetTime)` pairs (§5) since each call
/// produces and owns its own fresh [`Vfs`].
pub struct Rehydrator<G, B> {
    graph: G,
    blob: B,
}

impl<G, B> Rehydrator<G, B>
where
    G: GraphStore,
    B: BlobStore,
{
    pub fn new(graph: G, blob: B) -> Self {
        Self { graph, blob }
    }

    /// Reconstruct the VFS for `session_id` as of `target_time`.
    pub async fn rehydrate(
        &self,
        session_id: SessionId,
        target_time: Timestamp,
    ) -> Result<Vfs, RecallError> {
        let mut vfs = Vfs::new();

        let snapshot = self.graph.latest_snapshot(session_id, target_time).await?;
        let last_snapshot_time = match snapshot {
            Some(row) => {
                let blob = self.blob.load(&row.vfs_state_blob_ref).await?;
                vfs.load_snapshot(&blob).map_err(|e| RecallError::Rehydration {
                    stage: "VFSSnapshot",
                    cause: e.to_string(),
                })?;
                Timestamp::from_millis(row.snapshot_at)
            }
            None => Timestamp::from_millis(0),
        };

        let mut hunks = self
            .graph
            .diff_hunks(session_id, last_snapshot_time, target_time)
            .await?;
        hunks.sort_by(|a, b| a.vt_start.cmp(&b.vt_start).then_with(|| a.id.cmp(&b.id)));

        let total = hunks.len();
        let mut failures = 0usize;
        for hunk in &hunks {
            let path = Utf8Path::new(&hunk.file_path);
            if let Err(e) = recall_patch::apply_unified_diff(&mut vfs, path, &hunk.patch_content) {
                tracing::warn!(
                    file_path = %hunk.file_path,
                    vt_start = hunk.vt_start,
                    error = %e,
                    "diff hunk failed to apply during rehydration, skipping"
                );
                failures += 1;
            }
        }

        if total > 0 && failures == total {
            return Err(RecallError::Rehydration {
                stage: "DiffPatches",
                cause: format!("all {total} fetched diff hunks failed to apply"),
            });
        }

        Ok(vfs)
    }
}
