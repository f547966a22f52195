use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn write_pid(path: &Path) -> Result<()> {
    fs::write(path, std::process::id().to_string())
        .with_context(|| format!("failed to write pid file {}", path.display()))
}

/// Best-effort.
pub fn remove_pid(path: &Path) {
    let _ = fs::remove_file(path);
}
