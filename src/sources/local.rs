use super::ManifestSource;
use crate::error::{ReqgatherError, Result};
use crate::ui;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A manifest file on disk
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
    id: String,
}

impl LocalFileSource {
    pub fn new(path: PathBuf) -> Self {
        let id = path.display().to_string();
        Self { path, id }
    }
}

impl ManifestSource for LocalFileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn origin(&self) -> &'static str {
        "local"
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(&self.path).map_err(|e| ReqgatherError::IoError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(content.lines().map(String::from).collect())
    }
}

/// Collect every `manifest_name` file under `root`, plus the top-level
/// manifest when it exists.
///
/// Symlinked manifests count when they point at a regular file; symlinked
/// directories are not descended into. `output` is skipped during the walk
/// unless it is also the top-level manifest.
///
/// The result is de-duplicated and sorted byte-wise by path so precedence is
/// reproducible across filesystems.
pub fn discover_manifest_paths(
    root: &Path,
    manifest_name: &str,
    top_level: Option<&Path>,
    output: Option<&Path>,
) -> Vec<PathBuf> {
    let skipped = output.filter(|out| top_level != Some(*out));
    let mut found = Vec::new();

    if root.is_dir() {
        ui::verbose(&format!("Scanning for {} in {}", manifest_name, root.display()));

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    ui::warning(&format!("Skipping unreadable path during scan: {}", e));
                    continue;
                }
            };

            if entry.file_name() != manifest_name || !is_manifest_file(&entry) {
                continue;
            }
            if skipped == Some(entry.path()) {
                ui::verbose(&format!(
                    "Skipping output manifest {} during scan",
                    entry.path().display()
                ));
                continue;
            }
            found.push(entry.into_path());
        }
    } else {
        ui::warning(&format!(
            "Discovery root not found: {} (no component manifests)",
            root.display()
        ));
    }

    if let Some(top) = top_level
        && top.is_file()
    {
        found.push(top.to_path_buf());
    }

    found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    found.dedup();
    found
}

fn is_manifest_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests;
