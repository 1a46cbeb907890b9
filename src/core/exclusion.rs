//! Exclusion policy
//!
//! Exclusion lines go through the same specifier parser as regular
//! manifests so names normalize identically. Only names are kept.

use crate::core::specifier::{self, LineOutcome};
use crate::core::types::ExclusionSet;
use crate::ui;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Where exclusion names come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionSource {
    /// Dedicated exclusion manifest in requirements format
    File(PathBuf),
    /// Literal specifiers, e.g. from configuration
    Literal(Vec<String>),
    None,
}

/// Resolve a single exclusion source. Never fails: an absent or unreadable
/// manifest degrades to an empty set with a warning.
pub fn resolve_exclusions(source: &ExclusionSource) -> ExclusionSet {
    match source {
        ExclusionSource::File(path) => match fs::read_to_string(path) {
            Ok(content) => names_from_lines(content.lines(), &path.display().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                ui::warning(&format!(
                    "Exclusion manifest not found: {} (nothing excluded from it)",
                    path.display()
                ));
                ExclusionSet::default()
            }
            Err(e) => {
                ui::warning(&format!(
                    "Could not read exclusion manifest {}: {}",
                    path.display(),
                    e
                ));
                ExclusionSet::default()
            }
        },
        ExclusionSource::Literal(lines) => {
            names_from_lines(lines.iter().map(String::as_str), "configured exclusions")
        }
        ExclusionSource::None => {
            ui::warning("No exclusion source configured; nothing will be excluded");
            ExclusionSet::default()
        }
    }
}

/// Union of every source, resolved in order
pub fn resolve_all(sources: &[ExclusionSource]) -> ExclusionSet {
    sources
        .iter()
        .flat_map(|source| {
            resolve_exclusions(source)
                .iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn names_from_lines<'a>(lines: impl Iterator<Item = &'a str>, origin: &str) -> ExclusionSet {
    let mut names = Vec::new();
    for (idx, line) in lines.enumerate() {
        match specifier::parse_line(line) {
            LineOutcome::Entry(entry) => names.push(entry.name),
            LineOutcome::Skipped => {}
            LineOutcome::Rejected(reason) => ui::warning(&format!(
                "{}:{}: ignoring exclusion '{}': {}",
                origin,
                idx + 1,
                line.trim(),
                reason
            )),
        }
    }
    names.into_iter().collect()
}
