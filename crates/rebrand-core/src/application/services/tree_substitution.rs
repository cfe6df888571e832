//! Tree Substitution Engine - ordered literal rewriting across the project.
//!
//! Visits every regular file under the scan targets, skipping excluded
//! subtrees, and applies a [`SubstitutionPlan`]. Files that are not UTF-8
//! are recorded as skipped and never touched. A file is written back only if
//! its content changed, and each write is atomic.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::ProjectFilesystem,
    domain::{FileOutcome, SubstitutionPlan, TreeReport},
};

/// Which part of the project the engine walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeScope {
    pub root: PathBuf,
    /// Files or directories, relative to `root`.
    pub targets: Vec<PathBuf>,
    /// Subtrees (or single files), relative to `root`, never visited.
    pub excluded: Vec<PathBuf>,
}

impl TreeScope {
    fn absolute_excludes(&self) -> Vec<PathBuf> {
        self.excluded.iter().map(|p| self.root.join(p)).collect()
    }
}

pub struct TreeSubstitutionEngine<'a> {
    filesystem: &'a dyn ProjectFilesystem,
}

impl<'a> TreeSubstitutionEngine<'a> {
    pub fn new(filesystem: &'a dyn ProjectFilesystem) -> Self {
        Self { filesystem }
    }

    /// Walk the scope and rewrite matching files.
    ///
    /// With `write == false` the report describes what would change and the
    /// tree is left untouched. Per-file failures are recorded, never raised.
    #[instrument(skip_all, fields(root = %scope.root.display(), rules = plan.rules().len()))]
    pub fn run(&self, scope: &TreeScope, plan: &SubstitutionPlan, write: bool) -> TreeReport {
        let mut report = TreeReport::default();
        let excluded = scope.absolute_excludes();

        let mut files = BTreeSet::new();
        for target in &scope.targets {
            let target = scope.root.join(target);
            if !self.filesystem.exists(&target) {
                debug!(target = %target.display(), "Scan target absent, skipping");
                continue;
            }
            match self.filesystem.list_files(&target, &excluded) {
                Ok(found) => files.extend(found),
                Err(e) => {
                    warn!(target = %target.display(), error = %e, "Could not list scan target");
                    report.push(
                        relative(&scope.root, &target),
                        FileOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        for path in files {
            let outcome = self.visit(&path, plan, write);
            report.push(relative(&scope.root, &path), outcome);
        }

        info!(
            visited = report.visited(),
            changed = report.changed(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Tree substitution finished"
        );
        report
    }

    fn visit(&self, path: &Path, plan: &SubstitutionPlan, write: bool) -> FileOutcome {
        let bytes = match self.filesystem.read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Read failed");
                return FileOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let Ok(text) = String::from_utf8(bytes) else {
            debug!(path = %path.display(), "Not UTF-8, skipped");
            return FileOutcome::SkippedBinary;
        };

        let Some(substituted) = plan.apply(&text) else {
            return FileOutcome::Unchanged;
        };

        if write {
            if let Err(e) = self
                .filesystem
                .write_atomic(path, substituted.text.as_bytes())
            {
                warn!(path = %path.display(), error = %e, "Write failed, file left as it was");
                return FileOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        }

        debug!(
            path = %path.display(),
            replacements = substituted.replacements,
            "Rewrote file"
        );
        FileOutcome::Changed {
            replacements: substituted.replacements,
        }
    }
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{ApplicationError, ports::MockProjectFilesystem},
        domain::{AppId, AppName, Identity, template_identity},
    };

    fn plan() -> SubstitutionPlan {
        let new = Identity::new(
            AppId::parse("com.acme.taskflow").unwrap(),
            AppName::parse("Task Flow").unwrap(),
        );
        SubstitutionPlan::between(&template_identity(), &new).unwrap()
    }

    fn scope() -> TreeScope {
        TreeScope {
            root: PathBuf::from("/p"),
            targets: vec![PathBuf::from("lib")],
            excluded: vec![PathBuf::from("tool/rebrand")],
        }
    }

    fn listing(fs: &mut MockProjectFilesystem, files: &[&str]) {
        let files: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
        fs.expect_exists().return_const(true);
        fs.expect_list_files()
            .withf(|root, excluded| {
                root.to_path_buf() == PathBuf::from("/p/lib")
                    && excluded.to_vec() == vec![PathBuf::from("/p/tool/rebrand")]
            })
            .return_once(move |_, _| Ok(files));
    }

    #[test]
    fn unchanged_file_is_not_written() {
        let mut fs = MockProjectFilesystem::new();
        listing(&mut fs, &["/p/lib/a.dart"]);
        fs.expect_read()
            .returning(|_| Ok(b"void main() {}".to_vec()));
        fs.expect_write_atomic().never();

        let report = TreeSubstitutionEngine::new(&fs).run(&scope(), &plan(), true);
        assert_eq!(report.visited(), 1);
        assert_eq!(report.changed(), 0);
    }

    #[test]
    fn binary_file_is_skipped_without_write() {
        let mut fs = MockProjectFilesystem::new();
        listing(&mut fs, &["/p/lib/icon.png"]);
        fs.expect_read()
            .returning(|_| Ok(vec![0x89, b'P', b'N', b'G', 0xff, 0xfe, b'p']));
        fs.expect_write_atomic().never();

        let report = TreeSubstitutionEngine::new(&fs).run(&scope(), &plan(), true);
        assert_eq!(report.skipped(), 1);
        assert!(report.record_for(Path::new("lib/icon.png")).unwrap().skipped());
    }

    #[test]
    fn changed_file_written_once_with_new_content() {
        let mut fs = MockProjectFilesystem::new();
        listing(&mut fs, &["/p/lib/main.dart"]);
        fs.expect_read()
            .returning(|_| Ok(b"title: 'Purplestack'".to_vec()));
        fs.expect_write_atomic()
            .withf(|path, content| {
                path.to_path_buf() == PathBuf::from("/p/lib/main.dart")
                    && content.to_vec() == b"title: 'Task Flow'".to_vec()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let report = TreeSubstitutionEngine::new(&fs).run(&scope(), &plan(), true);
        assert_eq!(report.changed(), 1);
        assert_eq!(report.replacements(), 1);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let mut fs = MockProjectFilesystem::new();
        listing(&mut fs, &["/p/lib/main.dart"]);
        fs.expect_read()
            .returning(|_| Ok(b"purplestack".to_vec()));
        fs.expect_write_atomic().never();

        let report = TreeSubstitutionEngine::new(&fs).run(&scope(), &plan(), false);
        assert_eq!(report.changed(), 1);
    }

    #[test]
    fn one_failing_file_does_not_stop_the_walk() {
        let mut fs = MockProjectFilesystem::new();
        listing(&mut fs, &["/p/lib/a.dart", "/p/lib/b.dart"]);
        fs.expect_read().returning(|path| {
            if path.ends_with("a.dart") {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into())
            } else {
                Ok(b"com.example.purplestack".to_vec())
            }
        });
        fs.expect_write_atomic().times(1).returning(|_, _| Ok(()));

        let report = TreeSubstitutionEngine::new(&fs).run(&scope(), &plan(), true);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.changed(), 1);
    }

    #[test]
    fn absent_target_is_ignored() {
        let mut fs = MockProjectFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_list_files().never();

        let report = TreeSubstitutionEngine::new(&fs).run(&scope(), &plan(), true);
        assert_eq!(report.visited(), 0);
    }
}
