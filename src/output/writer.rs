//! Manifest writer
//!
//! Output is one `raw_specifier` per line in ascending name order. Writes go
//! through a sibling temp file and a rename so readers never observe a
//! truncated manifest.

use crate::constants::TEMP_FILE_SUFFIX;
use crate::core::types::AggregateMap;
use crate::error::{ReqgatherError, Result};
use crate::ui;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Render the map as manifest lines, sorted by normalized name
pub fn render(map: &AggregateMap) -> Vec<String> {
    map.entries().map(|entry| entry.raw_specifier.clone()).collect()
}

/// Join rendered lines into file content; every line is newline-terminated
pub fn to_content(lines: &[String]) -> String {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}

/// Atomically replace `path` with the rendered lines.
///
/// On failure the target is left untouched and the temp file removed.
pub fn write_manifest(path: &Path, lines: &[String]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| write_error(path, "output path has no file name".to_string()))?;

    fs::create_dir_all(&dir).map_err(|e| {
        write_error(path, format!("cannot create {}: {}", dir.display(), e))
    })?;

    let tmp_path = dir.join(format!(
        ".{}.{}",
        file_name.to_string_lossy(),
        TEMP_FILE_SUFFIX
    ));

    let content = to_content(lines);
    if let Err(e) = write_and_sync(&tmp_path, content.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_error(path, e.to_string()));
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_error(path, e.to_string()));
    }

    if let Ok(dir_file) = fs::File::open(&dir)
        && let Err(e) = dir_file.sync_all()
    {
        ui::verbose(&format!("Failed to sync output directory: {}", e));
    }

    Ok(())
}

/// True when `path` already holds exactly these lines
pub fn is_up_to_date(path: &Path, lines: &[String]) -> bool {
    fs::read_to_string(path)
        .map(|existing| existing == to_content(lines))
        .unwrap_or(false)
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn write_error(path: &Path, reason: String) -> ReqgatherError {
    ReqgatherError::WriteError {
        path: path.to_path_buf(),
        reason,
    }
}
