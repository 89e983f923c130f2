use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// The outcome of one `replay` invocation (§4.5).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Did the engine complete without an internal exception.
    pub success: bool,
    /// Are the original and replayed outputs structurally equal.
    pub matches: bool,
    pub original_output: Option<Value>,
    pub replay_output: Option<Value>,
    pub error: Option<String>,
}

impl ReplayReport {
    pub(crate) fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            matches: false,
            original_output: None,
            replay_output: None,
            error: Some(error.into()),
        }
    }

    pub(crate) fn execution_failure(original_output: Option<Value>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            matches: false,
            original_output,
            replay_output: None,
            error: Some(error.into()),
        }
    }
}
