//! Flags that shape how a run reports, not what it renames.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` shows phase transitions, `-vv` every visited file,
    /// `-vvv` everything.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only errors and run warnings; the summary is not printed.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain terminal output. Also set by `NO_COLOR`.
    #[arg(long = "no-color", env = "NO_COLOR")]
    pub no_color: bool,

    /// TOML file with baseline identity, scan targets and tool commands.
    /// Without it, `.rebrand.toml` in the project is used if present.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How the run summary is printed on stdout.
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Coloured summary with status symbols.
    Human,
    /// The same summary without colour.
    Plain,
    /// The run summary as one JSON document; logs also become JSON.
    Json,
}
