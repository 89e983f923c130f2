use recall_core::DiffHunkId;
use recall_core::RecallError;
use recall_core::ToolCallId;

fn field<'a>(row: &'a serde_json::Value, name: &str) -> Result<&'a serde_json::Value, RecallError> {
    row.get(name)
        .ok_or_else(|| RecallError::GraphStore(format!("row missing field '{name}'")))
}

fn as_i64(row: &serde_json::Value, name: &str) -> Result<i64, RecallError> {
    field(row, name)?
        .as_i64()
        .ok_or_else(|| RecallError::GraphStore(format!("field '{name}' is not an integer")))
}

fn as_string(row: &serde_json::Value, name: &str) -> Result<String, RecallError> {
    field(row, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| RecallError::GraphStore(format!("field '{name}' is not a string")))
}

/// One row returned by [`crate::queries::SNAPSHOT_LOOKUP`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotRow {
    pub vfs_state_blob_ref: String,
    pub snapshot_at: i64,
}

impl SnapshotRow {
    pub(crate) fn from_value(row: &serde_json::Value) -> Result<Self, RecallError> {
        Ok(Self {
            vfs_state_blob_ref: as_string(row, "vfs_state_blob_ref")?,
            snapshot_at: as_i64(row, "snapshot_at")?,
        })
    }
}

/// One row returned by [`crate::queries::DIFF_FETCH`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunkRow {
    pub id: DiffHunkId,
    pub file_path: String,
    pub patch_content: String,
    pub vt_start: i64,
}

impl DiffHunkRow {
    pub(crate) fn from_value(row: &serde_json::Value) -> Result<Self, RecallError> {
        let id_str = as_string(row, "id")?;
        let id = id_str
            .parse()
            .map_err(|_| RecallError::GraphStore(format!("invalid DiffHunk id: {id_str}")))?;
        Ok(Self {
            id,
            file_path: as_string(row, "file_path")?,
            patch_content: as_string(row, "patch_content")?,
            vt_start: as_i64(row, "vt_start")?,
        })
    }
}

/// One row returned by [`crate::queries::TOOL_CALL_FETCH`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCallRow {
    pub id: ToolCallId,
    pub name: String,
    pub arguments: String,
    pub result: Option<String>,
    pub vt_start: i64,
}

impl ToolCallRow {
    pub(crate) fn from_value(row: &serde_json::Value) -> Result<Self, RecallError> {
        let id_str = as_string(row, "id")?;
        let id = id_str
            .parse()
            .map_err(|_| RecallError::GraphStore(format!("invalid ToolCall id: {id_str}")))?;
        let result = match row.get("result") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(RecallError::GraphStore(
                    "field 'result' is not a string or null".into(),
                ))
            }
        };
        Ok(Self {
            id,
            name: as_string(row, "name")?,
            arguments: as_string(row, "arguments")?,
            result,
            vt_start: as_i64(row, "vt_start")?,
        })
    }
}
