//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command, GatherArgs};
use crate::commands;
use crate::error::Result;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    match &args.command {
        Some(Command::Gather(gather)) => commands::gather::run(&args.global, gather),

        Some(Command::Sources { discovery, format }) => {
            commands::sources::run(&args.global, discovery, *format)
        }

        Some(Command::Parse { lines, format }) => commands::parse::run(lines, *format),

        Some(Command::Completions { shell }) => commands::completions::run(*shell),

        None => commands::gather::run(&args.global, &GatherArgs::default()),
    }
}
