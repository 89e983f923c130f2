//! Path validation for VFS entries (invariant I2).
//!
//! Paths are absolute, begin with `/`, and normalized: no `.`, no `..`, no
//! empty segments except the root. Unlike the vendored `path-clean`
//! algorithm in `djls-source` (which *resolves* `.`/`..` away), the VFS
//! treats an unnormalized path as invalid input rather than silently
//! cleaning it — the data model (§3) states paths are normalized upstream,
//! so this module enforces that invariant instead of repairing violations.

use camino::Utf8Path;

use recall_core::RecallError;

/// Split an absolute VFS path into its non-empty segments.
///
/// The root path `/` yields an empty `Vec`. A trailing slash is
/// insignificant. Returns `InvalidPath` for anything not absolute,
/// containing `.`/`..`, or containing an empty interior segment.
pub(crate) fn normalize(path: &Utf8Path) -> Result<Vec<String>, RecallError> {
    let raw = path.as_str();

    if raw.is_empty() {
        return Err(RecallError::InvalidPath("path must not be empty".into()));
    }
    if !raw.starts_with('/') {
        return Err(RecallError::InvalidPath(format!(
            "path must be absolute: {raw}"
        )));
    }

    let trimmed = raw.strip_suffix('/').unwrap_or(raw);
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    for segment in trimmed[1..].split('/') {
        if segment.is_empty() {
            return Err(RecallError::InvalidPath(format!(
                "empty path segment in {raw}"
            )));
        }
        if segment == "." || segment == ".." {
            return Err(RecallError::InvalidPath(format!(
                "path must be normalized (no '.' or '..'): {raw}"
            )));
        }
        segments.push(segment.to_string());
    }
    Ok(segments)
}
