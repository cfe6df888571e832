//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `rebrand-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RebrandResult;

/// Port for filesystem operations on the project tree.
///
/// Implemented by:
/// - `rebrand_adapters::filesystem::LocalFilesystem` (production)
/// - `rebrand_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Content is bytes; decoding is the caller's decision
/// - `write_atomic` either replaces the whole file or leaves it untouched
#[cfg_attr(test, mockall::automock)]
pub trait ProjectFilesystem: Send + Sync {
    /// Every regular file under `root` (or `root` itself if it is a file),
    /// skipping any path under one of `excluded`. Sorted.
    fn list_files(&self, root: &Path, excluded: &[PathBuf]) -> RebrandResult<Vec<PathBuf>>;

    /// Read a whole file.
    fn read(&self, path: &Path) -> RebrandResult<Vec<u8>>;

    /// Replace a file's content all-or-nothing.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> RebrandResult<()>;

    /// Copy a file, creating the destination's parent directories.
    fn copy_file(&self, from: &Path, to: &Path) -> RebrandResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check that path is a regular file that can be opened for reading.
    fn is_readable_file(&self, path: &Path) -> bool;
}

/// An external command line: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a finished command exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl CommandOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            stderr: stderr.into(),
        }
    }

    /// One-line description of a failure for warnings.
    pub fn describe_failure(&self) -> String {
        let code = self
            .exit_code
            .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"));
        match self.stderr.lines().rev().find(|l| !l.trim().is_empty()) {
            Some(last) => format!("{code}: {}", last.trim()),
            None => code,
        }
    }
}

/// Port for running external build tools.
///
/// Implemented by:
/// - `rebrand_adapters::runner::ProcessRunner` (production)
/// - `rebrand_adapters::runner::ScriptedRunner` (testing)
///
/// Runs block until the process exits. `Err` means the command could not be
/// started; a started command that fails is an `Ok` outcome with
/// `success == false`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> RebrandResult<CommandOutcome>;
}
