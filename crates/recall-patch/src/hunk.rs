//! Unified-diff parsing (§4.2, wire format in §6).

use recall_core::RecallError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DiffLine {
    Context(String),
    Removed(String),
    Added(String),
}

#[derive(Clone, Debug)]
pub(crate) struct Hunk {
    pub(crate) old_start: usize,
    pub(crate) old_count: usize,
    pub(crate) new_start: usize,
    pub(crate) new_count: usize,
    pub(crate) lines: Vec<DiffLine>,
}

#[derive(Clone, Debug)]
pub(crate) struct ParsedDiff {
    /// `--- /dev/null` followed by `+++ b/<path>`: the file is being created.
    pub(crate) is_creation: bool,
    pub(crate) hunks: Vec<Hunk>,
}

/// Parse a unified diff. Does not look at file names beyond detecting the
/// `/dev/null` creation sentinel; the caller already knows which path it's
/// patching.
pub(crate) fn parse(diff: &str) -> Result<ParsedDiff, RecallError> {
    let mut lines = diff.lines().peekable();
    let mut is_creation = false;

    if let Some(&first) = lines.peek() {
        if first.starts_with("--- ") {
            is_creation = first.trim_start_matches("--- ").trim() == "/dev/null";
            lines.next();
            match lines.next() {
                Some(second) if second.starts_with("+++ ") => {}
                _ => {
                    return Err(RecallError::MalformedDiff(
                        "expected '+++' header after '---'".into(),
                    ))
                }
            }
        }
    }

    let mut hunks = Vec::new();
    while let Some(&line) = lines.peek() {
        if line.starts_with("@@") {
            hunks.push(parse_hunk(&mut lines)?);
        } else {
            lines.next();
        }
    }

    if hunks.is_empty() {
        return Err(RecallError::MalformedDiff(
            "diff contains no hunks".into(),
        ));
    }

    Ok(ParsedDiff { is_creation, hunks })
}

fn parse_hunk<'a>(
    lines: &mut std::iter::Peekable<impl Iterator<Item = &'a str>>,
) -> Result<Hunk, RecallError> {
    let header = lines.next().expect("caller checked starts_with(\"@@\")");
    let (old_start, old_count, new_start, new_count) = parse_header(header)?;

    let mut body = Vec::new();
    while let Some(&line) = lines.peek() {
        if line.starts_with("@@") {
            break;
        }
        lines.next();
        if let Some(rest) = line.strip_prefix(' ') {
            body.push(DiffLine::Context(rest.to_string()));
        } else if let Some(rest) = line.strip_prefix('-') {
            body.push(DiffLine::Removed(rest.to_string()));
        } else if let Some(rest) = line.strip_prefix('+') {
            body.push(DiffLine::Added(rest.to_string()));
        } else if line.starts_with('\\') {
            // "\ No newline at end of file" — not modeled, ignored.
        } else if line.is_empty() {
            body.push(DiffLine::Context(String::new()));
        } else {
            return Err(RecallError::MalformedDiff(format!(
                "unrecognized diff line: {line:?}"
            )));
        }
    }

    let context_and_removed = body
        .iter()
        .filter(|l| matches!(l, DiffLine::Context(_) | DiffLine::Removed(_)))
        .count();
    let context_and_added = body
        .iter()
        .filter(|l| matches!(l, DiffLine::Context(_) | DiffLine::Added(_)))
        .count();
    if context_and_removed != old_count || context_and_added != new_count {
        return Err(RecallError::MalformedDiff(format!(
            "hunk header {header:?} does not match its body line counts"
        )));
    }

    Ok(Hunk {
        old_start,
        old_count,
        new_start,
        new_count,
        lines: body,
    })
}

/// Parse `@@ -l,c +l,c @@[ trailing context]`. `,c` is omitted when `c == 1`.
fn parse_header(header: &str) -> Result<(usize, usize, usize, usize), RecallError> {
    let malformed = || RecallError::MalformedDiff(format!("malformed hunk header: {header:?}"));

    let rest = header.strip_prefix("@@ ").ok_or_else(malformed)?;
    let close = rest.find(" @@").ok_or_else(malformed)?;
    let body = &rest[..close];

    let mut parts = body.split(' ');
    let old = parts.next().ok_or_else(malformed)?;
    let new = parts.next().ok_or_else(malformed)?;

    let (old_start, old_count) = parse_range(old, '-')?;
    let (new_start, new_count) = parse_range(new, '+')?;
    Ok((old_start, old_count, new_start, new_count))
}

fn parse_range(field: &str, sigil: char) -> Result<(usize, usize), RecallError> {
    let malformed = || RecallError::MalformedDiff(format!("malformed range: {field:?}"));

    let body = field.strip_prefix(sigil).ok_or_else(malformed)?;
    match body.split_once(',') {
        Some((start, count)) => Ok((
            start.parse().map_err(|_| malformed())?,
            count.parse().map_err(|_| malformed())?,
        )),
        None => Ok((body.parse().map_err(|_| malformed())?, 1)),
    }
}
