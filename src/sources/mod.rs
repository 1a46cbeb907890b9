//! Manifest source discovery
//!
//! A source is anything that can hand back the raw lines of one manifest.
//! Discovery only decides which sources exist and in which order; reading is
//! deferred until the aggregator asks, and merging is never done here.

pub mod local;
pub mod memory;
pub mod remote;

use crate::config::types::GatherConfig;
use crate::error::Result;
use crate::ui;
use serde::Serialize;

pub use local::LocalFileSource;
pub use memory::InMemorySource;
pub use remote::RemoteSource;

/// Capability to produce the raw lines of one manifest
pub trait ManifestSource {
    /// Stable identifier used in diagnostics (a path or URL)
    fn id(&self) -> &str;

    /// Short origin label: "local", "remote" or "memory"
    fn origin(&self) -> &'static str;

    /// Read every line of the manifest. Called at most once per run.
    fn read_lines(&self) -> Result<Vec<String>>;
}

/// Serializable view of a discovered source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    pub position: usize,
    pub origin: String,
    pub id: String,
}

/// Enumerate every configured source in precedence order.
///
/// Local manifests come first (sorted by path) followed by remote manifests
/// in their configured order, unless `remote_first` flips the two groups.
pub fn discover(config: &GatherConfig) -> Vec<Box<dyn ManifestSource>> {
    let local: Vec<Box<dyn ManifestSource>> = local::discover_manifest_paths(
        &config.discovery_root,
        &config.manifest_name,
        config.top_level_manifest.as_deref(),
        Some(config.output.as_path()),
    )
    .into_iter()
    .map(|path| Box::new(LocalFileSource::new(path)) as Box<dyn ManifestSource>)
    .collect();

    let remote: Vec<Box<dyn ManifestSource>> = config
        .remote
        .urls
        .iter()
        .map(|url| {
            Box::new(RemoteSource::new(url, config.remote.timeout())) as Box<dyn ManifestSource>
        })
        .collect();

    ui::verbose(&format!(
        "Discovered {} local and {} remote source(s)",
        local.len(),
        remote.len()
    ));

    let (first, second) = if config.remote.remote_first {
        (remote, local)
    } else {
        (local, remote)
    };

    first.into_iter().chain(second).collect()
}

pub fn describe(sources: &[Box<dyn ManifestSource>]) -> Vec<SourceDescriptor> {
    sources
        .iter()
        .enumerate()
        .map(|(idx, source)| SourceDescriptor {
            position: idx + 1,
            origin: source.origin().to_string(),
            id: source.id().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests;
