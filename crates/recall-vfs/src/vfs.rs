use std::sync::Arc;

use camino::Utf8Path;
use recall_core::RecallError;

use crate::path;
use crate::snapshot;
use crate::snapshot::SnapshotFormat;
use crate::tree::Directory;
use crate::tree::Entry;

type Result<T> = std::result::Result<T, RecallError>;

/// In-memory, hierarchical, mutable filesystem (§4.1).
///
/// Each rehydration produces its own `Vfs`; none is shared across
/// concurrent rehydrations.
#[derive(Clone, Debug, Default)]
pub struct Vfs {
    root: Directory,
}

impl Vfs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the file at `path`. Creates every missing
    /// intermediate directory, matching `mkdir`'s own behavior (I4).
    ///
    /// `content` is required to already be valid UTF-8 (`&str`/`String`,
    /// via `AsRef<str>`) rather than arbitrary bytes: a File's payload is
    /// always a JSON string on the snapshot wire format (§4.1), so a
    /// byte sequence that isn't valid UTF-8 cannot be represented and
    /// must be rejected by the caller before it ever reaches the VFS,
    /// not silently replaced with U+FFFD.
    pub fn write_file(&mut self, path: &Utf8Path, content: impl AsRef<str>) -> Result<()> {
        let segments = path::normalize(path)?;
        let Some((file_name, dir_segments)) = segments.split_last() else {
            return Err(RecallError::IsADirectory(path.to_string()));
        };

        let mut dir = &mut self.root;
        for segment in dir_segments {
            dir = descend_or_create(dir, segment, path)?;
        }

        dir.children
            .insert(file_name.clone(), Entry::File(Arc::from(content.as_ref())));
        Ok(())
    }

    pub fn read_file(&self, path: &Utf8Path) -> Result<Arc<str>> {
        let segments = path::normalize(path)?;
        if segments.is_empty() {
            return Err(RecallError::IsADirectory(path.to_string()));
        }
        match self.get_entry(&segments, path)? {
            Some(Entry::File(content)) => Ok(content.clone()),
            Some(Entry::Directory(_)) => Err(RecallError::IsADirectory(path.to_string())),
            None => Err(RecallError::NotFound(path.to_string())),
        }
    }

    /// Ordered (name-sorted) sequence of child names.
    pub fn read_dir(&self, path: &Utf8Path) -> Result<Vec<String>> {
        let segments = path::normalize(path)?;
        if segments.is_empty() {
            return Ok(self.root.children.keys().cloned().collect());
        }
        match self.get_entry(&segments, path)? {
            Some(Entry::Directory(dir)) => Ok(dir.children.keys().cloned().collect()),
            Some(Entry::File(_)) => Err(RecallError::NotADirectory(path.to_string())),
            None => Err(RecallError::NotFound(path.to_string())),
        }
    }

    /// Create every missing intermediate directory (and `path` itself).
    /// Idempotent (I4): a no-op on an existing directory, fails only if a
    /// file already occupies one of the segments.
    pub fn mkdir(&mut self, path: &Utf8Path) -> Result<()> {
        let segments = path::normalize(path)?;
        let mut dir = &mut self.root;
        for segment in &segments {
            dir = descend_or_create(dir, segment, path)?;
        }
        Ok(())
    }

    /// Never fails: an invalid or absent path simply reports `false`.
    #[must_use]
    pub fn exists(&self, path: &Utf8Path) -> bool {
        match path::normalize(path) {
            Ok(segments) if segments.is_empty() => true,
            Ok(segments) => matches!(self.get_entry(&segments, path), Ok(Some(_))),
            Err(_) => false,
        }
    }

    /// Every file's absolute path and content, depth-first, name-sorted.
    ///
    /// Used to check the "same set of paths, same file contents" equality
    /// from §8 property 1; not part of the wire contract.
    #[must_use]
    pub fn walk(&self) -> Vec<(String, Arc<str>)> {
        let mut out = Vec::new();
        walk_into(&self.root, "", &mut out);
        out
    }

    /// Encode the tree as gzip(JSON) (§4.1).
    pub fn create_snapshot(&self) -> Result<Vec<u8>> {
        snapshot::encode(&self.root)
    }

    /// Replace the entire tree from a blob produced by `create_snapshot`
    /// (gzip) or a legacy raw-JSON `{"root": ...}` blob.
    pub fn load_snapshot(&mut self, blob: &[u8]) -> Result<SnapshotFormat> {
        let (root, format) = snapshot::decode(blob)?;
        self.root = root;
        Ok(format)
    }

    fn get_entry<'a>(
        &'a self,
        segments: &[String],
        original_path: &Utf8Path,
    ) -> Result<Option<&'a Entry>> {
        let mut dir = &self.root;
        for (i, segment) in segments.iter().enumerate() {
            let is_last = i + 1 == segments.len();
            match dir.children.get(segment) {
                None => return Ok(None),
                Some(entry) if is_last => return Ok(Some(entry)),
                Some(Entry::Directory(child)) => dir = child,
                Some(Entry::File(_)) => {
                    return Err(RecallError::NotADirectory(original_path.to_string()))
                }
            }
        }
        Ok(None)
    }
}

fn descend_or_create<'a>(
    dir: &'a mut Directory,
    segment: &str,
    original_path: &Utf8Path,
) -> Result<&'a mut Directory> {
    let entry = dir
        .children
        .entry(segment.to_string())
        .or_insert_with(|| Entry::Directory(Directory::default()));
    match entry {
        Entry::Directory(child) => Ok(child),
        Entry::File(_) => Err(RecallError::NotADirectory(original_path.to_string())),
    }
}

fn walk_into(dir: &Directory, prefix: &str, out: &mut Vec<(String, Arc<str>)>) {
    for (name, entry) in &dir.children {
        let full_path = format!("{prefix}/{name}");
        match entry {
            Entry::File(content) => out.push((full_path, content.clone())),
            Entry::Directory(child) => walk_into(child, &full_path, out),
        }
    }
}
