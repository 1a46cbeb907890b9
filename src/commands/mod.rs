pub mod completions;
pub mod gather;
pub mod parse;
pub mod sources;

use crate::cli::args::GlobalFlags;
use crate::config::{self, GatherConfig, RawConfig};
use crate::error::Result;
use crate::ui;

/// Stack defaults, the config file (if any) and CLI overrides
pub(crate) fn resolve_config(global: &GlobalFlags, overrides: RawConfig) -> Result<GatherConfig> {
    let file_layer = match config::locate_config_file(global.config.as_deref())? {
        Some(path) => {
            ui::verbose(&format!("Using config file {}", path.display()));
            config::load_config_file(&path)?
        }
        None => RawConfig::default(),
    };

    file_layer.merge(overrides).resolve()
}
