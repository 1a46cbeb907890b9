pub mod args;
pub mod dispatcher;

pub use args::{Cli, ColorMode, Command, DiscoveryArgs, GatherArgs, GlobalFlags, OutputFormat};
