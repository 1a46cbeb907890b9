pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod project_identity;
pub mod sources;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run reqgather CLI entrypoint.
pub fn run_cli() {
    let args = cli::args::Cli::parse();

    // Color settings must be applied before anything is printed
    ui::init_colors(args.global.color.as_str());
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
