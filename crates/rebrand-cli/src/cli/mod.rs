//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
///
/// `--version` sets the manifest version, so the tool's own version is
/// printed by `-V` / `--tool-version`.
#[derive(Debug, Parser)]
#[command(
    name    = "rebrand",
    bin_name = "rebrand",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Give a freshly generated app template its own identity",
    long_about = "rebrand rewrites the template's app id, display name and package \
                  name across every platform subtree, updates the manifest, refreshes \
                  dependencies and optionally generates launcher icons.",
    after_help = "EXAMPLES:\n\
        \x20 rebrand --name \"Task Flow\" --app-id com.acme.taskflow\n\
        \x20 rebrand --name \"Task Flow\" --app-id com.acme.taskflow --version 1.0.0+1 --icon art/icon.png\n\
        \x20 rebrand --name \"Task Flow\" --app-id com.acme.taskflow --dry-run --output-format json\n\
        \x20 rebrand --name Tasks --app-id com.acme.tasks --old-name \"Task Flow\" --old-app-id com.acme.taskflow",
    arg_required_else_help = true,
    disable_version_flag = true,
)]
pub struct Cli {
    /// Flags that control logging and output.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The new identity and what to do with it.
    #[command(flatten)]
    pub rename: RenameArgs,

    /// Print the tool's version.
    #[arg(short = 'V', long = "tool-version", action = clap::ArgAction::Version)]
    pub tool_version: Option<bool>,
}

// ── rename ────────────────────────────────────────────────────────────────────

/// Identity, icon and run-mode flags.
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Human-readable application name.
    #[arg(long = "name", value_name = "NAME", help = "New display name")]
    pub name: String,

    /// Reverse-domain application identifier.
    #[arg(
        long = "app-id",
        value_name = "ID",
        help = "New reverse-domain app id, e.g. com.acme.taskflow"
    )]
    pub app_id: String,

    #[arg(
        long = "description",
        value_name = "TEXT",
        help = "Manifest description (left untouched when omitted)"
    )]
    pub description: Option<String>,

    #[arg(
        long = "version",
        value_name = "VERSION",
        help = "Manifest version, MAJOR.MINOR.PATCH[+BUILD] (default 0.1.0)"
    )]
    pub version: Option<String>,

    #[arg(long = "icon", value_name = "FILE", help = "Main launcher icon")]
    pub icon: Option<PathBuf>,

    #[arg(
        long = "adaptive-background",
        value_name = "FILE",
        help = "Android adaptive icon background layer"
    )]
    pub adaptive_background: Option<PathBuf>,

    #[arg(
        long = "adaptive-foreground",
        value_name = "FILE",
        help = "Android adaptive icon foreground layer"
    )]
    pub adaptive_foreground: Option<PathBuf>,

    #[arg(
        long = "adaptive-monochrome",
        value_name = "FILE",
        help = "Android adaptive icon monochrome layer"
    )]
    pub adaptive_monochrome: Option<PathBuf>,

    #[arg(
        long = "notification-icon",
        value_name = "FILE",
        help = "Android notification icon"
    )]
    pub notification_icon: Option<PathBuf>,

    /// Previous app id when renaming an already renamed project.
    #[arg(
        long = "old-app-id",
        value_name = "ID",
        help = "App id to replace (default: the template's)"
    )]
    pub old_app_id: Option<String>,

    /// Previous display name when renaming an already renamed project.
    #[arg(
        long = "old-name",
        value_name = "NAME",
        help = "Display name to replace (default: the template's)"
    )]
    pub old_name: Option<String>,

    #[arg(
        long = "project-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Project root containing the manifest"
    )]
    pub project_dir: PathBuf,

    /// Preview what would change without writing any files.
    #[arg(long = "dry-run", help = "Report changes without writing or running anything")]
    pub dry_run: bool,

    #[arg(long = "no-refresh", help = "Skip the dependency clean and fetch")]
    pub no_refresh: bool,

    #[arg(long = "no-icons", help = "Skip icon generation even if icons are given")]
    pub no_icons: bool,
}

// ── tests ─────────────────────────────────────────────────────────────────────
