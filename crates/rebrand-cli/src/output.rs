//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use rebrand_core::domain::{IconOutcome, RunSummary};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliResult;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON modes.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.  Shown in quiet mode: warnings mean
    /// something needs manual follow-up.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout. Only written in JSON mode; never suppressed
    /// by `--quiet`.
    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        if self.is_json() {
            self.term.write_line(&serde_json::to_string_pretty(value)?)?;
        }
        Ok(())
    }

    /// Render the outcome of a rename run.
    pub fn summary(&self, summary: &RunSummary, headline: &str) -> CliResult<()> {
        if self.is_json() {
            return self.json(summary);
        }

        let tree = &summary.tree;
        if summary.dry_run {
            self.info(&format!("Dry run: {headline}, nothing was written"))?;
        } else {
            self.success(headline)?;
        }

        let verb = if summary.dry_run { "would change" } else { "changed" };
        self.print(&format!(
            "  Manifest:     {}",
            if summary.manifest_changed { verb } else { "unchanged" }
        ))?;
        self.print(&format!(
            "  Files:        {} of {} {verb} ({} replacements)",
            tree.changed(),
            tree.visited(),
            tree.replacements()
        ))?;
        if tree.skipped() > 0 {
            self.print(&format!("  Binary:       {} skipped", tree.skipped()))?;
        }
        let icons = match summary.icons {
            IconOutcome::NotRequested => "not requested",
            IconOutcome::Generated => "generated",
            IconOutcome::Failed => "failed, manifest restored",
        };
        self.print(&format!("  Icons:        {icons}"))?;

        for warning in &summary.warnings {
            self.warning(&warning.to_string())?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    fn silent(&self) -> bool {
        self.quiet || self.is_json()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
