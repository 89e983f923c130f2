use camino::Utf8Path;
use recall_core::RecallError;
use recall_vfs::Vfs;
use serde_json::json;
use serde_json::Value;

/// Re-execute one recorded tool call against `vfs` (§4.5 step 4).
///
/// Realized as a closed match over tool names per §9: adding a new
/// tool means adding an arm here, not touching the engine's state
/// machine. The final arm never mutates the VFS.
pub(crate) fn execute(vfs: &mut Vfs, name: &str, args: &Value) -> Result<Value, RecallError> {
    match name {
        "read_file" => {
            let content = vfs.read_file(arg_path(args)?)?;
            Ok(json!({ "content": content.to_string() }))
        }
        "write_file" => {
            let content = arg_str(args, "content")?;
            vfs.write_file(arg_path(args)?, content)?;
            Ok(json!({ "success": true }))
        }
        "list_directory" => {
            let entries = vfs.read_dir(arg_path(args)?)?;
            Ok(json!({ "entries": entries }))
        }
        "mkdir" | "create_directory" => {
            vfs.mkdir(arg_path(args)?)?;
            Ok(json!({ "success": true }))
        }
        "exists" | "file_exists" => Ok(json!({ "exists": vfs.exists(arg_path(args)?) })),
        other => Ok(json!({
            "error": format!("Tool '{other}' replay not implemented"),
            "args": args,
        })),
    }
}

fn arg_path(args: &Value) -> Result<&Utf8Path, RecallError> {
    arg_str(args, "path").map(Utf8Path::new)
}

fn arg_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, RecallError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| RecallError::InvalidPath(format!("missing or non-string '{key}' argument")))
}
