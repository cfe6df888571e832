//! Per-file records and run summaries.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// What happened to one visited file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Unchanged,
    Changed { replacements: usize },
    /// Not valid UTF-8; bytes left untouched.
    SkippedBinary,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChangeRecord {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileChangeRecord {
    pub fn changed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Changed { .. })
    }

    pub fn skipped(&self) -> bool {
        matches!(self.outcome, FileOutcome::SkippedBinary)
    }
}

/// Aggregate of a tree walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeReport {
    pub records: Vec<FileChangeRecord>,
}

impl TreeReport {
    pub fn push(&mut self, path: impl Into<PathBuf>, outcome: FileOutcome) {
        self.records.push(FileChangeRecord {
            path: path.into(),
            outcome,
        });
    }

    pub fn visited(&self) -> usize {
        self.records.len()
    }

    pub fn changed(&self) -> usize {
        self.records.iter().filter(|r| r.changed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.records.iter().filter(|r| r.skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Failed { .. }))
            .count()
    }

    pub fn replacements(&self) -> usize {
        self.records
            .iter()
            .map(|r| match r.outcome {
                FileOutcome::Changed { replacements } => replacements,
                _ => 0,
            })
            .sum()
    }

    pub fn record_for(&self, path: &std::path::Path) -> Option<&FileChangeRecord> {
        self.records.iter().find(|r| r.path == path)
    }
}

/// Something went wrong after the textual rename succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    RefreshFailed { command: String, detail: String },
    GeneratorFailed { command: String, detail: String },
    FileFailed { path: PathBuf, reason: String },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RefreshFailed { command, detail } => {
                write!(f, "dependency refresh `{command}` failed: {detail}")
            }
            Self::GeneratorFailed { command, detail } => {
                write!(f, "icon generator `{command}` failed: {detail}")
            }
            Self::FileFailed { path, reason } => {
                write!(f, "could not rewrite {}: {reason}", path.display())
            }
        }
    }
}

/// Coordinator state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenamePhase {
    Validating,
    EditingManifest,
    SubstitutingTree,
    RefreshingDependencies,
    GeneratingIcons,
    Done,
    Failed,
}

impl fmt::Display for RenamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validating => "validating",
            Self::EditingManifest => "editing-manifest",
            Self::SubstitutingTree => "substituting-tree",
            Self::RefreshingDependencies => "refreshing-dependencies",
            Self::GeneratingIcons => "generating-icons",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// How the optional icon phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconOutcome {
    /// No icons supplied, `--no-icons`, or dry run.
    NotRequested,
    Generated,
    /// Generator failed; manifest restored, warning recorded.
    Failed,
}

/// Final report of a rename run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub phase: RenamePhase,
    pub dry_run: bool,
    pub manifest_changed: bool,
    pub tree: TreeReport,
    pub icons: IconOutcome,
    pub warnings: Vec<RunWarning>,
}

impl RunSummary {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_by_outcome() {
        let mut report = TreeReport::default();
        report.push("a.dart", FileOutcome::Changed { replacements: 3 });
        report.push("b.dart", FileOutcome::Unchanged);
        report.push("c.png", FileOutcome::SkippedBinary);
        report.push("d.txt", FileOutcome::Failed {
            reason: "denied".into(),
        });
        report.push("e.kt", FileOutcome::Changed { replacements: 1 });

        assert_eq!(report.visited(), 5);
        assert_eq!(report.changed(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.replacements(), 4);
        assert!(report.record_for("c.png".as_ref()).unwrap().skipped());
    }

    #[test]
    fn warning_display_names_command() {
        let w = RunWarning::RefreshFailed {
            command: "flutter clean".into(),
            detail: "exit code 1".into(),
        };
        assert_eq!(w.to_string(), "dependency refresh `flutter clean` failed: exit code 1");
    }
}
