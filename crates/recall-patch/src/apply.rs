use camino::Utf8Path;
use recall_core::RecallError;
use recall_vfs::Vfs;

use crate::hunk::parse;
use crate::hunk::DiffLine;
use crate::hunk::Hunk;

/// Apply a unified diff to the file at `path` (§4.2).
///
/// Hunks are applied in file order. A `--- /dev/null` / `+++ b/<path>`
/// pair creates the file from the hunks' additions. Otherwise every hunk
/// must match the current content context-for-context; on any mismatch
/// the whole call fails and the VFS is left untouched.
pub fn apply_unified_diff(vfs: &mut Vfs, path: &Utf8Path, diff: &str) -> Result<(), RecallError> {
    let parsed = parse(diff)?;

    if parsed.is_creation {
        let content = render_creation(&parsed.hunks);
        vfs.write_file(path, content)?;
        return Ok(());
    }

    let original = vfs.read_file(path)?;
    let new_content = apply_hunks(&original, &parsed.hunks, path)?;
    vfs.write_file(path, new_content)?;
    Ok(())
}

fn render_creation(hunks: &[Hunk]) -> String {
    let mut lines = Vec::new();
    for hunk in hunks {
        for line in &hunk.lines {
            if let DiffLine::Added(text) = line {
                lines.push(text.as_str());
            }
        }
    }
    let mut out = lines.join("\n");
    if !lines.is_empty() {
        out.push('\n');
    }
    out
}

/// Apply every hunk against `original`'s lines, failing hard (no partial
/// mutation returned to the caller) the moment any context/removed line
/// fails to match.
fn apply_hunks(original: &str, hunks: &[Hunk], path: &Utf8Path) -> Result<String, RecallError> {
    let original_lines: Vec<&str> = split_lines(original);
    let mut cursor = 0usize; // index into original_lines already consumed
    let mut out: Vec<String> = Vec::new();

    for hunk in hunks {
        let start = hunk.old_start.saturating_sub(1);
        if start < cursor || start > original_lines.len() {
            return Err(RecallError::ContextMismatch {
                path: path.to_string(),
            });
        }
        out.extend(original_lines[cursor..start].iter().map(|s| s.to_string()));

        let mut pos = start;
        for line in &hunk.lines {
            match line {
                DiffLine::Context(text) => {
                    let actual = *original_lines.get(pos).ok_or_else(|| {
                        RecallError::ContextMismatch {
                            path: path.to_string(),
                        }
                    })?;
                    if actual != text.as_str() {
                        return Err(RecallError::ContextMismatch {
                            path: path.to_string(),
                        });
                    }
                    out.push(text.clone());
                    pos += 1;
                }
                DiffLine::Removed(text) => {
                    let actual = *original_lines.get(pos).ok_or_else(|| {
                        RecallError::ContextMismatch {
                            path: path.to_string(),
                        }
                    })?;
                    if actual != text.as_str() {
                        return Err(RecallError::ContextMismatch {
                            path: path.to_string(),
                        });
                    }
                    pos += 1;
                }
                DiffLine::Added(text) => out.push(text.clone()),
            }
        }
        cursor = pos;
    }

    out.extend(original_lines[cursor..].iter().map(|s| s.to_string()));
    Ok(out.join("\n"))
}

/// `original.lines()` loses the information of whether the content ended
/// in a trailing newline; splitting on `\n` directly preserves it as a
/// trailing empty element, which `join("\n")` later restores exactly.
fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }
    content.split('\n').collect()
}

/// Replace every non-overlapping occurrence of `search` with `replace`
/// in the file at `path` (§4.2).
pub fn apply_search_replace(
    vfs: &mut Vfs,
    path: &Utf8Path,
    search: &str,
    replace: &str,
) -> Result<(), RecallError> {
    let original = vfs.read_file(path)?;
    if !original.contains(search) {
        return Err(RecallError::SearchNotFound {
            path: path.to_string(),
        });
    }
    let replaced = original.replace(search, replace);
    vfs.write_file(path, replaced)?;
    Ok(())
}
