//! Dependency Refresh Runner - clean and re-fetch after the rename.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::ports::{CommandRunner, CommandSpec},
    domain::RunWarning,
};

pub struct DependencyRefresher<'a> {
    runner: &'a dyn CommandRunner,
    commands: &'a [CommandSpec],
}

impl<'a> DependencyRefresher<'a> {
    /// `commands` run in order, typically a cache clean then a fetch.
    pub fn new(runner: &'a dyn CommandRunner, commands: &'a [CommandSpec]) -> Self {
        Self { runner, commands }
    }

    /// Run every command. Failures become warnings and do not stop the rest.
    #[instrument(skip_all, fields(project = %project_root.display()))]
    pub fn run(&self, project_root: &Path) -> Vec<RunWarning> {
        let mut warnings = Vec::new();

        for command in self.commands {
            info!(command = %command, "Running");
            let detail = match self.runner.run(command, project_root) {
                Ok(outcome) if outcome.success => continue,
                Ok(outcome) => outcome.describe_failure(),
                Err(e) => e.to_string(),
            };
            warn!(command = %command, %detail, "Dependency refresh step failed");
            warnings.push(RunWarning::RefreshFailed {
                command: command.to_string(),
                detail,
            });
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{CommandOutcome, MockCommandRunner},
    };
    use mockall::Sequence;

    fn commands() -> Vec<CommandSpec> {
        vec![
            CommandSpec::new("flutter", ["clean"]),
            CommandSpec::new("flutter", ["pub", "get"]),
        ]
    }

    #[test]
    fn runs_clean_then_fetch_in_project_root() {
        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        for args in [vec!["clean"], vec!["pub", "get"]] {
            runner
                .expect_run()
                .withf(move |cmd, cwd| {
                    cmd.args == args && cwd.to_path_buf() == Path::new("/p").to_path_buf()
                })
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(CommandOutcome::ok()));
        }

        let commands = commands();
        let warnings = DependencyRefresher::new(&runner, &commands).run(Path::new("/p"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn failing_clean_still_fetches_and_warns() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(2).returning(|cmd, _| {
            if cmd.args == ["clean"] {
                Ok(CommandOutcome::failed(1, "Oops\nlock held\n"))
            } else {
                Ok(CommandOutcome::ok())
            }
        });

        let commands = commands();
        let warnings = DependencyRefresher::new(&runner, &commands).run(Path::new("/p"));
        assert_eq!(
            warnings,
            vec![RunWarning::RefreshFailed {
                command: "flutter clean".into(),
                detail: "exit code 1: lock held".into(),
            }]
        );
    }

    #[test]
    fn missing_tool_is_a_warning() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|cmd, _| {
            Err(ApplicationError::CommandSpawnFailed {
                command: cmd.to_string(),
                reason: "not found".into(),
            }
            .into())
        });

        let commands = commands();
        let warnings = DependencyRefresher::new(&runner, &commands).run(Path::new("/p"));
        assert_eq!(warnings.len(), 2);
    }
}
