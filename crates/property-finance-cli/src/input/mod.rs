pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a typed request from `--input <file>` or, failing that, piped stdin.
///
/// Returns `None` when neither is present so the caller can fall back to flags.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_input(path).map(Some);
    }
    match stdin::read_stdin()? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
