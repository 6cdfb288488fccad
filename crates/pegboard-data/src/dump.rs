//! Raw provider payload dumps.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// File path used for a ticker's raw dump inside `dir`.
pub fn raw_dump_path(dir: &Path, ticker: &str) -> PathBuf {
    dir.join(format!("{}_full_info.json", ticker.to_uppercase()))
}

/// Write a raw payload as pretty-printed JSON, creating `dir` if needed.
///
/// Returns the path written.
pub fn dump_raw_json(dir: &Path, ticker: &str, payload: &serde_json::Value) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = raw_dump_path(dir, ticker);
    let content = serde_json::to_string_pretty(payload)?;
    std::fs::write(&path, content)?;
    tracing::debug!(ticker, path = %path.display(), "wrote raw payload");
    Ok(path)
}
