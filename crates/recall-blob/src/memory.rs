use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use recall_core::RecallError;
use ulid::Ulid;

use crate::BlobStore;

/// An in-memory stand-in for a real blob store, keyed by freshly minted
/// ULID refs. Mirrors `djls-workspace`'s `InMemoryFileSystem` test double:
/// a plain map behind the same trait a production collaborator implements.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob under a caller-chosen ref (as opposed to `save`, which
    /// mints one), useful for fixture loading.
    pub fn seed(&self, blob_ref: impl Into<String>, bytes: Vec<u8>) {
        self.blobs.write().unwrap().insert(blob_ref.into(), bytes);
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn load(&self, blob_ref: &str) -> Result<Vec<u8>, RecallError> {
        self.blobs
            .read()
            .unwrap()
            .get(blob_ref)
            .cloned()
            .ok_or_else(|| RecallError::BlobStore(format!("no blob for ref '{blob_ref}'")))
    }

    async fn save(&self, bytes: Vec<u8>) -> Result<String, RecallError> {
        let blob_ref = Ulid::new().to_string();
        self.blobs.write().unwrap().insert(blob_ref.clone(), bytes);
        Ok(blob_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryBlobStore::new();
        let blob_ref = store.save(b"hello".to_vec()).await.unwrap();
        assert_eq!(store.load(&blob_ref).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn load_missing_ref_is_blob_store_error() {
        let store = InMemoryBlobStore::new();
        let err = store.load("missing").await.unwrap_err();
        assert_eq!(err.tag(), "BlobStore");
    }

    #[tokio::test]
    async fn seed_allows_caller_chosen_refs() {
        let store = InMemoryBlobStore::new();
        store.seed("fixture-ref", b"data".to_vec());
        assert_eq!(store.load("fixture-ref").await.unwrap(), b"data");
    }
}
