use crate::config::types::RawConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "reqgather",
    about = "Aggregate requirements manifests into one deterministic manifest",
    long_about = "Collects requirements.txt files from component directories and remote \
                  locations, keeps the first declaration of every package, applies \
                  exclusions and supplemental packages, and writes one sorted manifest.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    /// Defaults to `gather` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode (warnings and errors only)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    /// Config file (default: ./reqgather.kdl, then the user config dir)
    #[arg(short = 'c', long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover, merge and write the aggregated manifest
    Gather(GatherArgs),

    /// List discovered manifest sources in precedence order
    Sources {
        #[command(flatten)]
        discovery: DiscoveryArgs,

        /// Machine-readable output
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show how requirement lines are parsed
    Parse {
        /// Requirement lines to parse
        #[arg(required = true, value_name = "LINE")]
        lines: Vec<String>,

        /// Machine-readable output
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags that decide which sources exist and in which order
#[derive(Args, Debug, Default, Clone)]
pub struct DiscoveryArgs {
    /// Application root (derives default paths)
    #[arg(long, value_name = "DIR", help_heading = "Discovery")]
    pub app_root: Option<PathBuf>,

    /// Directory scanned recursively for manifests
    #[arg(long, value_name = "DIR", help_heading = "Discovery")]
    pub root: Option<PathBuf>,

    /// Manifest file name to look for
    #[arg(long, value_name = "NAME", help_heading = "Discovery")]
    pub manifest_name: Option<String>,

    /// Top-level manifest included when present
    #[arg(long, value_name = "FILE", help_heading = "Discovery")]
    pub top_level: Option<PathBuf>,

    /// Do not include the top-level manifest
    #[arg(long, conflicts_with = "top_level", help_heading = "Discovery")]
    pub no_top_level: bool,

    /// Remote manifest URL (repeatable; order is precedence)
    #[arg(long = "remote", value_name = "URL", help_heading = "Remote")]
    pub remotes: Vec<String>,

    /// Per-fetch timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        help_heading = "Remote"
    )]
    pub timeout: Option<u64>,

    /// Give remote sources precedence over local ones
    #[arg(long, help_heading = "Remote")]
    pub remote_first: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GatherArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Output manifest path
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exclusion manifest (requirements format, names only)
    #[arg(long, value_name = "FILE", help_heading = "Filtering")]
    pub exclude_file: Option<PathBuf>,

    /// Exclude a package by name (repeatable; replaces configured list)
    #[arg(long = "exclude", value_name = "NAME", help_heading = "Filtering")]
    pub excludes: Vec<String>,

    /// Supplemental requirement (repeatable; replaces configured list)
    #[arg(long = "supplemental", value_name = "SPEC", help_heading = "Filtering")]
    pub supplementals: Vec<String>,

    /// Do not inject supplemental packages
    #[arg(long, conflicts_with = "supplementals", help_heading = "Filtering")]
    pub no_supplemental: bool,

    /// Warn about later declarations that lost to an earlier one
    #[arg(long, help_heading = "Conflicts")]
    pub report_conflicts: bool,

    /// Fail instead of writing when declarations conflict
    #[arg(long, help_heading = "Conflicts")]
    pub strict_conflicts: bool,

    /// Print the manifest to stdout instead of writing it
    #[arg(long, conflicts_with_all = ["check", "format"])]
    pub stdout: bool,

    /// Fail if the output manifest is not up to date; write nothing
    #[arg(long)]
    pub check: bool,

    /// Machine-readable run summary on stdout
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl DiscoveryArgs {
    pub fn to_overrides(&self) -> RawConfig {
        RawConfig {
            app_root: self.app_root.clone(),
            discovery_root: self.root.clone(),
            manifest_name: self.manifest_name.clone(),
            top_level_manifest: self.top_level.clone(),
            skip_top_level: self.no_top_level.then_some(true),
            remote_urls: non_empty(&self.remotes),
            remote_timeout_secs: self.timeout,
            remote_first: self.remote_first.then_some(true),
            ..Default::default()
        }
    }
}

impl GatherArgs {
    /// CLI layer on top of the config file. Unset flags leave it alone.
    pub fn to_overrides(&self) -> RawConfig {
        let supplemental = if self.no_supplemental {
            Some(Vec::new())
        } else {
            non_empty(&self.supplementals)
        };

        RawConfig {
            output: self.output.clone(),
            exclude_file: self.exclude_file.clone(),
            exclude: non_empty(&self.excludes),
            supplemental,
            report_conflicts: self.report_conflicts.then_some(true),
            strict_conflicts: self.strict_conflicts.then_some(true),
            ..self.discovery.to_overrides()
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}
