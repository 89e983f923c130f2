use std::sync::Arc;

use async_trait::async_trait;
use recall_core::RecallError;

/// The Blob Store collaborator interface (§6): byte I/O keyed by an
/// opaque reference string. `load` is what the Rehydrator uses; `save`
/// exists for the snapshot-writing collaborator, which is out of the
/// core's scope but shares this trait.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn load(&self, blob_ref: &str) -> Result<Vec<u8>, RecallError>;

    async fn save(&self, bytes: Vec<u8>) -> Result<String, RecallError>;
}

#[async_trait]
impl<T: BlobStore + ?Sized> BlobStore for Arc<T> {
    async fn load(&self, blob_ref: &str) -> Result<Vec<u8>, RecallError> {
        (**self).load(blob_ref).await
    }

    async fn save(&self, bytes: Vec<u8>) -> Result<String, RecallError> {
        (**self).save(bytes).await
    }
}
