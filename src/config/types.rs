use crate::constants::{
    DEFAULT_APP_ROOT, DEFAULT_DISCOVERY_DIR, DEFAULT_EXCLUSIONS, DEFAULT_REMOTE_TIMEOUT_SECS,
    MANIFEST_FILE_NAME, RUNTIME_PROVIDED, SUPPLEMENTAL,
};
use crate::core::exclusion::ExclusionSource;
use crate::error::Result;
use crate::utils::paths::expand_home;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One configuration layer. Every field is optional so layers can be
/// stacked with [`RawConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    pub app_root: Option<PathBuf>,
    pub discovery_root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub top_level_manifest: Option<PathBuf>,
    /// Leave the top-level manifest out of discovery
    pub skip_top_level: Option<bool>,
    pub manifest_name: Option<String>,
    /// `Some(vec![])` disables the supplemental list
    pub supplemental: Option<Vec<String>>,
    pub exclude_file: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub hard_drop: Option<Vec<String>>,
    pub remote_urls: Option<Vec<String>>,
    pub remote_timeout_secs: Option<u64>,
    pub remote_first: Option<bool>,
    pub report_conflicts: Option<bool>,
    pub strict_conflicts: Option<bool>,
}

impl RawConfig {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(self, other: RawConfig) -> RawConfig {
        RawConfig {
            app_root: other.app_root.or(self.app_root),
            discovery_root: other.discovery_root.or(self.discovery_root),
            output: other.output.or(self.output),
            top_level_manifest: other.top_level_manifest.or(self.top_level_manifest),
            skip_top_level: other.skip_top_level.or(self.skip_top_level),
            manifest_name: other.manifest_name.or(self.manifest_name),
            supplemental: other.supplemental.or(self.supplemental),
            exclude_file: other.exclude_file.or(self.exclude_file),
            exclude: other.exclude.or(self.exclude),
            hard_drop: other.hard_drop.or(self.hard_drop),
            remote_urls: other.remote_urls.or(self.remote_urls),
            remote_timeout_secs: other.remote_timeout_secs.or(self.remote_timeout_secs),
            remote_first: other.remote_first.or(self.remote_first),
            report_conflicts: other.report_conflicts.or(self.report_conflicts),
            strict_conflicts: other.strict_conflicts.or(self.strict_conflicts),
        }
    }

    /// Fill in defaults and expand `~` in paths.
    pub fn resolve(self) -> Result<GatherConfig> {
        let app_root = expand_home(
            self.app_root
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_APP_ROOT)),
        )?;
        let manifest_name = self
            .manifest_name
            .unwrap_or_else(|| MANIFEST_FILE_NAME.to_string());

        let discovery_root = match self.discovery_root {
            Some(path) => expand_home(&path)?,
            None => app_root.join(DEFAULT_DISCOVERY_DIR),
        };
        let output = match self.output {
            Some(path) => expand_home(&path)?,
            None => app_root.join(&manifest_name),
        };
        let top_level_manifest = if self.skip_top_level.unwrap_or(false) {
            None
        } else {
            Some(match self.top_level_manifest {
                Some(path) => expand_home(&path)?,
                None => app_root.join(&manifest_name),
            })
        };
        let exclude_file = self
            .exclude_file
            .map(|path| expand_home(&path))
            .transpose()?;

        Ok(GatherConfig {
            app_root,
            discovery_root,
            output,
            top_level_manifest,
            manifest_name,
            supplemental: self.supplemental.unwrap_or_else(|| to_strings(SUPPLEMENTAL)),
            exclude_file,
            exclude: self.exclude.unwrap_or_else(|| to_strings(DEFAULT_EXCLUSIONS)),
            hard_drop: self
                .hard_drop
                .unwrap_or_else(|| to_strings(RUNTIME_PROVIDED))
                .into_iter()
                .map(|name| name.to_lowercase())
                .collect(),
            remote: RemoteConfig {
                urls: self.remote_urls.unwrap_or_default(),
                timeout_secs: self
                    .remote_timeout_secs
                    .unwrap_or(DEFAULT_REMOTE_TIMEOUT_SECS),
                remote_first: self.remote_first.unwrap_or(false),
            },
            report_conflicts: self.report_conflicts.unwrap_or(false),
            strict_conflicts: self.strict_conflicts.unwrap_or(false),
        })
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteConfig {
    pub urls: Vec<String>,
    pub timeout_secs: u64,
    pub remote_first: bool,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_enabled(&self) -> bool {
        !self.urls.is_empty()
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatherConfig {
    pub app_root: PathBuf,
    pub discovery_root: PathBuf,
    pub output: PathBuf,
    pub top_level_manifest: Option<PathBuf>,
    pub manifest_name: String,
    pub supplemental: Vec<String>,
    pub exclude_file: Option<PathBuf>,
    /// Literal exclusions; full specifiers are allowed, only names count
    pub exclude: Vec<String>,
    pub hard_drop: Vec<String>,
    pub remote: RemoteConfig,
    pub report_conflicts: bool,
    pub strict_conflicts: bool,
}

impl GatherConfig {
    /// Exclusion sources in resolution order
    pub fn exclusion_sources(&self) -> Vec<ExclusionSource> {
        let mut sources = Vec::new();
        if let Some(path) = &self.exclude_file {
            sources.push(ExclusionSource::File(path.clone()));
        }
        if !self.exclude.is_empty() {
            sources.push(ExclusionSource::Literal(self.exclude.clone()));
        }
        if sources.is_empty() {
            sources.push(ExclusionSource::None);
        }
        sources
    }
}
