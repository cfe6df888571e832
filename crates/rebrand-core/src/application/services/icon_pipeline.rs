//! Icon Pipeline Orchestrator - launcher icon generation.
//!
//! The generator reads its settings from the manifest, so the manifest is
//! augmented for the duration of one generator run and then put back. The
//! manifest is held through a [`ManifestLease`]: acquired with a snapshot,
//! released by restoring that snapshot. If the lease is dropped without an
//! explicit release (early return, unwinding), `Drop` restores it.

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec, ProjectFilesystem},
    },
    domain::{
        IconOutcome, IconPlatforms, IconRole, ManifestEditor, ManifestSnapshot, RenameSpec,
        RunWarning,
    },
    error::RebrandResult,
};

/// Scoped ownership of the manifest during the icon phase.
pub struct ManifestLease<'a> {
    filesystem: &'a dyn ProjectFilesystem,
    snapshot: ManifestSnapshot,
    released: bool,
}

impl<'a> ManifestLease<'a> {
    /// Snapshot the manifest's current bytes.
    pub fn acquire(filesystem: &'a dyn ProjectFilesystem, path: &Path) -> RebrandResult<Self> {
        let bytes = filesystem.read(path)?;
        Ok(Self {
            filesystem,
            snapshot: ManifestSnapshot::new(path, bytes),
            released: false,
        })
    }

    pub fn snapshot(&self) -> &ManifestSnapshot {
        &self.snapshot
    }

    /// Replace the manifest's content while the lease is held.
    pub fn write(&self, content: &[u8]) -> RebrandResult<()> {
        self.filesystem.write_atomic(self.snapshot.path(), content)
    }

    /// Restore the snapshot and end the lease.
    pub fn release(mut self) -> RebrandResult<()> {
        self.released = true;
        restore(self.filesystem, &self.snapshot)
    }
}

impl Drop for ManifestLease<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match restore(self.filesystem, &self.snapshot) {
            Ok(()) => warn!(
                path = %self.snapshot.path().display(),
                "Manifest restored after an interrupted icon phase"
            ),
            Err(e) => error!(error = %e, "Manifest could not be restored"),
        }
    }
}

fn restore(filesystem: &dyn ProjectFilesystem, snapshot: &ManifestSnapshot) -> RebrandResult<()> {
    filesystem
        .write_atomic(snapshot.path(), snapshot.bytes())
        .map_err(|e| {
            ApplicationError::ManifestRestoreFailed {
                path: snapshot.path().to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
}

/// Settings for the icon phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSettings {
    pub generator: CommandSpec,
    pub platforms: IconPlatforms,
    /// Where the notification icon is copied, relative to the project root.
    pub notification_destination: PathBuf,
}

/// What the icon phase produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPhaseResult {
    pub outcome: IconOutcome,
    pub warnings: Vec<RunWarning>,
}

impl IconPhaseResult {
    fn not_requested() -> Self {
        Self {
            outcome: IconOutcome::NotRequested,
            warnings: Vec::new(),
        }
    }
}

pub struct IconPipeline<'a> {
    filesystem: &'a dyn ProjectFilesystem,
    runner: &'a dyn CommandRunner,
    settings: &'a IconSettings,
}

impl<'a> IconPipeline<'a> {
    pub fn new(
        filesystem: &'a dyn ProjectFilesystem,
        runner: &'a dyn CommandRunner,
        settings: &'a IconSettings,
    ) -> Self {
        Self {
            filesystem,
            runner,
            settings,
        }
    }

    /// Generate icons for `spec.icons()`.
    ///
    /// Only a failed manifest restore is returned as `Err`; every other
    /// failure is a warning because the rename has already been applied.
    #[instrument(skip_all, fields(manifest = %manifest_path.display(), icons = spec.icons().len()))]
    pub fn run(
        &self,
        project_root: &Path,
        manifest_path: &Path,
        spec: &RenameSpec,
    ) -> RebrandResult<IconPhaseResult> {
        if spec.icons().is_empty() {
            return Ok(IconPhaseResult::not_requested());
        }

        let mut warnings = self.place_notification_icon(project_root, spec);

        if !spec.icons().has_launcher_icon() {
            info!("Only a notification icon was supplied, generator not needed");
            let outcome = if warnings.is_empty() {
                IconOutcome::Generated
            } else {
                IconOutcome::Failed
            };
            return Ok(IconPhaseResult { outcome, warnings });
        }

        let lease = match ManifestLease::acquire(self.filesystem, manifest_path) {
            Ok(lease) => lease,
            Err(e) => {
                warnings.push(self.generator_warning(e.to_string()));
                return Ok(IconPhaseResult {
                    outcome: IconOutcome::Failed,
                    warnings,
                });
            }
        };

        let generated = self.generate(&lease, project_root, spec);
        lease.release()?;
        info!("Manifest restored");

        let outcome = match generated {
            Ok(()) if warnings.is_empty() => IconOutcome::Generated,
            Ok(()) => IconOutcome::Failed,
            Err(detail) => {
                warnings.push(self.generator_warning(detail));
                IconOutcome::Failed
            }
        };

        Ok(IconPhaseResult { outcome, warnings })
    }

    /// Write the augmented manifest and run the generator once. The error
    /// is the detail for the warning.
    fn generate(
        &self,
        lease: &ManifestLease<'_>,
        project_root: &Path,
        spec: &RenameSpec,
    ) -> Result<(), String> {
        let snapshot = lease.snapshot();
        let text = std::str::from_utf8(snapshot.bytes()).map_err(|_| {
            ApplicationError::ManifestNotText {
                path: snapshot.path().to_path_buf(),
            }
            .to_string()
        })?;

        let augmented =
            ManifestEditor::with_icon_directives(text, spec.icons(), &self.settings.platforms);
        lease.write(augmented.as_bytes()).map_err(|e| e.to_string())?;

        info!(command = %self.settings.generator, "Running icon generator");
        let outcome = self
            .runner
            .run(&self.settings.generator, project_root)
            .map_err(|e| e.to_string())?;

        if outcome.success {
            Ok(())
        } else {
            Err(outcome.describe_failure())
        }
    }

    fn place_notification_icon(&self, project_root: &Path, spec: &RenameSpec) -> Vec<RunWarning> {
        let Some(source) = spec.icons().get(IconRole::Notification) else {
            return Vec::new();
        };
        let destination = project_root.join(&self.settings.notification_destination);

        match self.filesystem.copy_file(source, &destination) {
            Ok(()) => {
                info!(to = %destination.display(), "Notification icon placed");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Notification icon could not be copied");
                vec![RunWarning::FileFailed {
                    path: destination,
                    reason: e.to_string(),
                }]
            }
        }
    }

    fn generator_warning(&self, detail: String) -> RunWarning {
        warn!(command = %self.settings.generator, %detail, "Icon generation failed");
        RunWarning::GeneratorFailed {
            command: self.settings.generator.to_string(),
            detail,
        }
    }
}
