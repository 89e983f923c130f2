use thiserror::Error;

/// The stable error taxonomy shared by every `recall-*` component (§6/§7).
///
/// Each variant's wire tag (`tag()`) is what a caller should match on;
/// `Display`/`Error` messages carry human-readable context but are not
/// part of the stable contract, matching the shape of
/// `djls-templates::TemplateError` (a flat enum with a separate
/// `diagnostic_code()`/`code()` accessor).
#[derive(Debug, Error)]
pub enum RecallError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("is a directory: {0}")]
    IsADirectory(String),

    #[error("context mismatch applying patch to {path}")]
    ContextMismatch { path: String },

    #[error("search string not found in {path}")]
    SearchNotFound { path: String },

    #[error("malformed diff: {0}")]
    MalformedDiff(String),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Fatal rehydration failure. `stage` is `"VFSSnapshot"` or `"DiffPatches"`
    /// per §4.3's failure policy.
    #[error("rehydration failed at stage '{stage}': {cause}")]
    Rehydration { stage: &'static str, cause: String },

    #[error("graph store error: {0}")]
    GraphStore(String),

    #[error("blob store error: {0}")]
    BlobStore(String),
}

impl RecallError {
    /// The stable tag a caller should match on (§6's "Error taxonomy
    /// over the wire"), independent of the `Display` message.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            RecallError::NotFound(_) => "NotFound",
            RecallError::InvalidPath(_) => "InvalidPath",
            RecallError::NotADirectory(_) => "NotADirectory",
            RecallError::IsADirectory(_) => "IsADirectory",
            RecallError::ContextMismatch { .. } => "ContextMismatch",
            RecallError::SearchNotFound { .. } => "SearchNotFound",
            RecallError::MalformedDiff(_) => "MalformedDiff",
            RecallError::CorruptSnapshot(_) => "CorruptSnapshot",
            RecallError::Rehydration { .. } => "RehydrationError",
            RecallError::GraphStore(_) => "GraphStore",
            RecallError::BlobStore(_) => "BlobStore",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_spec_taxonomy() {
        assert_eq!(RecallError::NotFound(String::new()).tag(), "NotFound");
        assert_eq!(
            RecallError::Rehydration {
                stage: "VFSSnapshot",
                cause: String::new()
            }
            .tag(),
            "RehydrationError"
        );
    }
}
