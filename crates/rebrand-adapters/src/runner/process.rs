//! Subprocess runner using std::process.

use std::path::Path;
use std::process::{Command, Stdio};

use rebrand_core::{
    application::{
        ApplicationError,
        ports::{CommandOutcome, CommandRunner, CommandSpec},
    },
    error::RebrandResult,
};
use tracing::{debug, instrument};

/// Production runner. Blocks until the child exits and captures its output
/// so it never interleaves with the tool's own stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %command, cwd = %cwd.display()))]
    fn run(&self, command: &CommandSpec, cwd: &Path) -> RebrandResult<CommandOutcome> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::CommandSpawnFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(stdout = %stdout.trim_end(), "Command output");
        }

        Ok(CommandOutcome {
            success: output.status.success(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn successful_command() {
        let dir = TempDir::new().unwrap();
        let outcome = ProcessRunner::new()
            .run(&CommandSpec::new("true", Vec::<String>::new()), dir.path())
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[test]
    fn failing_command_reports_code_and_stderr() {
        let dir = TempDir::new().unwrap();
        let outcome = ProcessRunner::new()
            .run(
                &CommandSpec::new("sh", ["-c", "echo broken >&2; exit 3"]),
                dir.path(),
            )
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.describe_failure(), "exit code 3: broken");
    }

    #[test]
    fn runs_in_the_given_directory() {
        let dir = TempDir::new().unwrap();
        ProcessRunner::new()
            .run(&CommandSpec::new("touch", ["marker"]), dir.path())
            .unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let err = ProcessRunner::new()
            .run(
                &CommandSpec::new("rebrand-no-such-tool", ["x"]),
                dir.path(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("Could not start `rebrand-no-such-tool x`"));
    }
}
