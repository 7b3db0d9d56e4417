//! JSON export of results.
//!
//! Non-finite numbers (the NaN p-values and effects of degenerate results)
//! serialize as `null`.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

/// Pretty-printed JSON for any result value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let json = to_json(value)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json + "\n")
}
