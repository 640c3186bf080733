use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Create the directory and its parents unless it is already there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.is_dir() { return Ok(()) }
    if path.exists() {
        anyhow::bail!("[common::fs] {} exists but is not a directory", path.display());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("[common::fs] Failed to create directory {}", path.display()))
}

/// Create the parent directory of an output file if needed.
pub fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir_exists(parent),
        _ => Ok(()),
    }
}

/// Error unless a regular file exists at `path`.
pub fn require_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("[common::fs] File does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("[common::fs] {} exists but is not a file", path.display());
    }
    Ok(())
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    ensure_parent_dir_exists(path)?;
    fs::write(path, contents)
        .with_context(|| format!("[common::fs] Failed to write {}", path.display()))
}
