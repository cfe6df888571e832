//! Scripted runner for testing.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rebrand_core::{
    application::{
        ApplicationError,
        ports::{CommandOutcome, CommandRunner, CommandSpec},
    },
    error::RebrandResult,
};

/// What a scripted command does when run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedStep {
    Succeed,
    Fail { exit_code: i32, stderr: String },
    /// The program cannot be started.
    SpawnError,
    /// Unwind out of `run`, like a crash inside the caller's process.
    Panic,
}

type Observer = Arc<dyn Fn(&CommandSpec, &Path) + Send + Sync>;

/// Runner that never spawns anything.
///
/// Commands succeed unless a step was scripted for their command line.
/// Every call is recorded.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    steps: Arc<Mutex<HashMap<String, ScriptedStep>>>,
    calls: Arc<Mutex<Vec<(CommandSpec, PathBuf)>>>,
    observer: Option<Observer>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the step for `command_line` (program and args joined by spaces).
    pub fn with_step(self, command_line: impl Into<String>, step: ScriptedStep) -> Self {
        if let Ok(mut steps) = self.steps.lock() {
            steps.insert(command_line.into(), step);
        }
        self
    }

    /// Called before every command runs, e.g. to inspect files the command
    /// would read.
    pub fn with_observer(
        mut self,
        observer: impl Fn(&CommandSpec, &Path) + Send + Sync + 'static,
    ) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(c, _)| c.to_string()).collect())
            .unwrap_or_default()
    }

    /// Working directories of the calls so far.
    pub fn cwds(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, cwd)| cwd.clone()).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for ScriptedRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedRunner")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> RebrandResult<CommandOutcome> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((command.clone(), cwd.to_path_buf()));
        }
        if let Some(observer) = &self.observer {
            observer(command, cwd);
        }

        let line = command.to_string();
        let step = self
            .steps
            .lock()
            .ok()
            .and_then(|steps| steps.get(&line).cloned())
            .unwrap_or(ScriptedStep::Succeed);

        match step {
            ScriptedStep::Succeed => Ok(CommandOutcome::ok()),
            ScriptedStep::Fail { exit_code, stderr } => {
                Ok(CommandOutcome::failed(exit_code, stderr))
            }
            ScriptedStep::SpawnError => Err(ApplicationError::CommandSpawnFailed {
                command: line,
                reason: "No such file or directory (os error 2)".into(),
            }
            .into()),
            ScriptedStep::Panic => panic!("scripted panic while running `{line}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_commands_succeed_and_are_recorded() {
        let runner = ScriptedRunner::new();
        let outcome = runner
            .run(&CommandSpec::new("flutter", ["clean"]), Path::new("/p"))
            .unwrap();

        assert!(outcome.success);
        assert_eq!(runner.calls(), vec!["flutter clean"]);
        assert_eq!(runner.cwds(), vec![PathBuf::from("/p")]);
    }

    #[test]
    fn scripted_failure() {
        let runner = ScriptedRunner::new().with_step(
            "flutter pub get",
            ScriptedStep::Fail {
                exit_code: 69,
                stderr: "offline".into(),
            },
        );
        let outcome = runner
            .run(&CommandSpec::new("flutter", ["pub", "get"]), Path::new("/p"))
            .unwrap();
        assert_eq!(outcome.describe_failure(), "exit code 69: offline");
    }
}
