//! Snapshot wire format (§4.1): gzip(JSON(tree)), with a legacy
//! `{"root": <tree>}` raw-JSON fallback for historical data.

use std::io::Read;
use std::io::Write;
use std::sync::Arc;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use recall_core::RecallError;
use serde_json::Map;
use serde_json::Value;

use crate::tree::Directory;
use crate::tree::Entry;

/// Which of the two accepted wire forms a snapshot decoded as.
///
/// Recorded in diagnostics (not guessed at) per the open question in
/// §9: gzip is always attempted first, and the legacy form is only
/// tried once gzip decoding has *failed*, so the two paths never both
/// succeed for the same input.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SnapshotFormat {
    Gzip,
    LegacyJson,
}

pub(crate) fn encode(root: &Directory) -> Result<Vec<u8>, RecallError> {
    let json = directory_to_json(root);
    let text = serde_json::to_vec(&json)
        .map_err(|e| RecallError::CorruptSnapshot(format!("failed to serialize tree: {e}")))?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&text)
        .map_err(|e| RecallError::CorruptSnapshot(format!("gzip compression failed: {e}")))?;
    encoder
        .finish()
        .map_err(|e| RecallError::CorruptSnapshot(format!("gzip compression failed: {e}")))
}

pub(crate) fn decode(blob: &[u8]) -> Result<(Directory, SnapshotFormat), RecallError> {
    if let Ok(root) = decode_gzip(blob) {
        tracing::debug!(format = ?SnapshotFormat::Gzip, "decoded VFS snapshot");
        return Ok((root, SnapshotFormat::Gzip));
    }
    if let Ok(root) = decode_legacy_json(blob) {
        tracing::debug!(format = ?SnapshotFormat::LegacyJson, "decoded VFS snapshot");
        return Ok((root, SnapshotFormat::LegacyJson));
    }
    Err(RecallError::CorruptSnapshot(
        "snapshot decoded as neither gzip nor legacy JSON".into(),
    ))
}

fn decode_gzip(blob: &[u8]) -> Result<Directory, RecallError> {
    let mut decoder = GzDecoder::new(blob);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|e| RecallError::CorruptSnapshot(e.to_string()))?;
    let value: Value =
        serde_json::from_str(&text).map_err(|e| RecallError::CorruptSnapshot(e.to_string()))?;
    json_to_directory(&value)
}

fn decode_legacy_json(blob: &[u8]) -> Result<Directory, RecallError> {
    let text =
        std::str::from_utf8(blob).map_err(|e| RecallError::CorruptSnapshot(e.to_string()))?;
    let value: Value =
        serde_json::from_str(text).map_err(|e| RecallError::CorruptSnapshot(e.to_string()))?;
    let root = value
        .as_object()
        .and_then(|obj| obj.get("root"))
        .ok_or_else(|| RecallError::CorruptSnapshot("legacy snapshot missing 'root' key".into()))?;
    json_to_directory(root)
}

fn directory_to_json(dir: &Directory) -> Value {
    let mut map = Map::with_capacity(dir.children.len());
    for (name, entry) in &dir.children {
        let value = match entry {
            Entry::File(content) => Value::String(content.to_string()),
            Entry::Directory(child) => directory_to_json(child),
        };
        map.insert(name.clone(), value);
    }
    Value::Object(map)
}

fn json_to_directory(value: &Value) -> Result<Directory, RecallError> {
    let obj = value
        .as_object()
        .ok_or_else(|| RecallError::CorruptSnapshot("expected a JSON object".into()))?;

    let mut dir = Directory::default();
    for (name, child) in obj {
        let entry = match child {
            Value::String(content) => Entry::File(Arc::from(content.as_str())),
            Value::Object(_) => Entry::Directory(json_to_directory(child)?),
            other => {
                return Err(RecallError::CorruptSnapshot(format!(
                    "unexpected value at '{name}': {other}"
                )))
            }
        };
        dir.children.insert(name.clone(), entry);
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(dir: &mut Directory, name: &str, content: &str) {
        dir.children
            .insert(name.to_string(), Entry::File(Arc::from(content)));
    }

    #[test]
    fn round_trips_nested_tree() {
        let mut root = Directory::default();
        leaf(&mut root, "a.txt", "hello");
        let mut sub = Directory::default();
        leaf(&mut sub, "b.txt", "world");
        root.children
            .insert("sub".to_string(), Entry::Directory(sub));

        let blob = encode(&root).unwrap();
        let (decoded, format) = decode(&blob).unwrap();
        assert_eq!(format, SnapshotFormat::Gzip);
        assert_eq!(directory_to_json(&decoded), directory_to_json(&root));
    }

    #[test]
    fn round_trips_empty_file() {
        let mut root = Directory::default();
        leaf(&mut root, "empty.txt", "");
        let blob = encode(&root).unwrap();
        let (decoded, _) = decode(&blob).unwrap();
        assert_eq!(directory_to_json(&decoded), directory_to_json(&root));
    }

    #[test]
    fn round_trips_unicode_content() {
        let mut root = Directory::default();
        leaf(&mut root, "unicode.txt", "héllo wörld 𝄞 🎉");
        let blob = encode(&root).unwrap();
        let (decoded, _) = decode(&blob).unwrap();
        assert_eq!(directory_to_json(&decoded), directory_to_json(&root));
    }

    #[test]
    fn round_trips_one_mebibyte_file() {
        let mut root = Directory::default();
        let content = "x".repeat(1024 * 1024);
        leaf(&mut root, "big.txt", &content);
        let blob = encode(&root).unwrap();
        let (decoded, _) = decode(&blob).unwrap();
        assert_eq!(directory_to_json(&decoded), directory_to_json(&root));
    }

    #[test]
    fn accepts_legacy_raw_json_with_root_key() {
        let legacy = serde_json::json!({
            "root": { "a.txt": "legacy content" }
        });
        let raw = serde_json::to_vec(&legacy).unwrap();
        let (decoded, format) = decode(&raw).unwrap();
        assert_eq!(format, SnapshotFormat::LegacyJson);
        assert!(matches!(
            decoded.children.get("a.txt"),
            Some(Entry::File(c)) if &**c == "legacy content"
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode(b"not a valid snapshot at all").is_err());
    }
}
