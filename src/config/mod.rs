//! Run configuration
//!
//! Layers, later wins: built-in defaults, the KDL config file, CLI flags.

pub mod loader;
pub mod types;

pub use loader::{load_config_file, locate_config_file, parse_config};
pub use types::{GatherConfig, RawConfig, RemoteConfig};
