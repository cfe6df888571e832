//! Rename Service - main application orchestrator.
//!
//! This service drives one rename run through its phases:
//! 1. Validate input and read the manifest (no mutation before this passes)
//! 2. Edit the manifest's identity fields
//! 3. Substitute the old identity across the project tree
//! 4. Refresh dependencies
//! 5. Generate launcher icons
//!
//! Failures after step 1 are not rolled back. Problems in steps 4 and 5 are
//! warnings on the [`RunSummary`], except a failed manifest restore.

use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec, ProjectFilesystem},
        services::{
            dependency_refresh::DependencyRefresher,
            icon_pipeline::{IconPipeline, IconSettings},
            tree_substitution::{TreeScope, TreeSubstitutionEngine},
        },
    },
    domain::{
        FileOutcome, IconOutcome, IconPlatforms, Identity, InputValidator, ManifestEditor,
        RawRenameInput, RenamePhase, RenameSpec, RunSummary, RunWarning, SubstitutionPlan,
        TreeReport, template_identity,
    },
    error::RebrandResult,
};

/// Where things live in the project and which tools to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSettings {
    /// The "old" identity unless the input names a previous one.
    pub baseline: Identity,
    /// Relative to the project root.
    pub manifest_file: PathBuf,
    /// The tool's own installation subtree; never rewritten.
    pub tool_dir: PathBuf,
    pub scan_targets: Vec<PathBuf>,
    pub excluded: Vec<PathBuf>,
    pub refresh_commands: Vec<CommandSpec>,
    pub icons: IconSettings,
}

impl Default for RenameSettings {
    fn default() -> Self {
        let paths = |items: &[&str]| items.iter().map(PathBuf::from).collect::<Vec<_>>();
        Self {
            baseline: template_identity(),
            manifest_file: PathBuf::from("pubspec.yaml"),
            tool_dir: PathBuf::from("tool/rebrand"),
            scan_targets: paths(&[
                "android",
                "ios",
                "linux",
                "macos",
                "web",
                "windows",
                "lib",
                "test",
                "integration_test",
                "README.md",
            ]),
            excluded: paths(&[
                ".git",
                ".dart_tool",
                "build",
                "android/.gradle",
                "android/app/build",
                "ios/Pods",
                "ios/.symlinks",
                "ios/Flutter/ephemeral",
                "macos/Pods",
                "macos/Flutter/ephemeral",
                "linux/flutter/ephemeral",
                "windows/flutter/ephemeral",
            ]),
            refresh_commands: vec![
                CommandSpec::new("flutter", ["clean"]),
                CommandSpec::new("flutter", ["pub", "get"]),
            ],
            icons: IconSettings {
                generator: CommandSpec::new("dart", ["run", "flutter_launcher_icons"]),
                platforms: IconPlatforms::default(),
                notification_destination: PathBuf::from(
                    "android/app/src/main/res/drawable/ic_stat_notification.png",
                ),
            },
        }
    }
}

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    /// Compute the report without writing or running anything.
    pub dry_run: bool,
    pub skip_refresh: bool,
    pub skip_icons: bool,
}

/// Main rename service.
///
/// Orchestrates validation, manifest editing, tree substitution, dependency
/// refresh and icon generation.
pub struct RenameService {
    filesystem: Box<dyn ProjectFilesystem>,
    runner: Box<dyn CommandRunner>,
    settings: RenameSettings,
}

impl RenameService {
    /// Create a new rename service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use rebrand_core::application::{RenameService, RenameSettings};
    ///
    /// let service = RenameService::new(
    ///     filesystem, // impl ProjectFilesystem
    ///     runner,     // impl CommandRunner
    ///     RenameSettings::default(),
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn ProjectFilesystem>,
        runner: Box<dyn CommandRunner>,
        settings: RenameSettings,
    ) -> Self {
        Self {
            filesystem,
            runner,
            settings,
        }
    }

    pub fn settings(&self) -> &RenameSettings {
        &self.settings
    }

    /// Rename the project at `project_root`.
    ///
    /// Returns `Err` only for fatal problems: invalid input, a missing or
    /// unreadable manifest, a failed manifest write, or a failed restore.
    #[instrument(
        skip_all,
        fields(
            project = %project_root.display(),
            dry_run = options.dry_run
        )
    )]
    pub fn rename(
        &self,
        input: &RawRenameInput,
        project_root: &Path,
        options: RenameOptions,
    ) -> RebrandResult<RunSummary> {
        let mut phase = RenamePhase::Validating;
        match self.execute(input, project_root, options, &mut phase) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                error!(phase = %phase, error = %e, "Rename failed");
                info!(from = %phase, to = %RenamePhase::Failed, "Phase transition");
                Err(e)
            }
        }
    }

    fn execute(
        &self,
        input: &RawRenameInput,
        project_root: &Path,
        options: RenameOptions,
        phase: &mut RenamePhase,
    ) -> RebrandResult<RunSummary> {
        info!(phase = %phase, "Starting rename");

        // 1. Validate before anything is touched
        let (spec, plan, manifest_text) = self.prepare(input, project_root)?;
        info!(
            from = %spec.old().app_id,
            to = %spec.new_identity().app_id,
            rules = plan.rules().len(),
            "Input validated"
        );
        let manifest_path = project_root.join(&self.settings.manifest_file);

        // 2. Manifest
        transition(phase, RenamePhase::EditingManifest);
        let edited = ManifestEditor::apply(&manifest_text, &spec);
        let manifest_changed = edited != manifest_text;
        if manifest_changed && !options.dry_run {
            self.filesystem
                .write_atomic(&manifest_path, edited.as_bytes())?;
            info!("Manifest updated");
        }

        // 3. Tree
        transition(phase, RenamePhase::SubstitutingTree);
        let tree = TreeSubstitutionEngine::new(self.filesystem.as_ref()).run(
            &self.scope(project_root),
            &plan,
            !options.dry_run,
        );
        let mut warnings = file_warnings(&tree);

        // 4. Dependencies
        transition(phase, RenamePhase::RefreshingDependencies);
        if options.dry_run || options.skip_refresh {
            info!("Dependency refresh skipped");
        } else {
            let refresher =
                DependencyRefresher::new(self.runner.as_ref(), &self.settings.refresh_commands);
            warnings.extend(refresher.run(project_root));
        }

        // 5. Icons
        transition(phase, RenamePhase::GeneratingIcons);
        let icons = if options.dry_run || options.skip_icons {
            if !spec.icons().is_empty() {
                info!("Icon generation skipped");
            }
            IconOutcome::NotRequested
        } else {
            let pipeline = IconPipeline::new(
                self.filesystem.as_ref(),
                self.runner.as_ref(),
                &self.settings.icons,
            );
            let result = pipeline.run(project_root, &manifest_path, &spec)?;
            warnings.extend(result.warnings);
            result.outcome
        };

        transition(phase, RenamePhase::Done);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "Rename finished with warnings");
        }

        Ok(RunSummary {
            phase: *phase,
            dry_run: options.dry_run,
            manifest_changed,
            tree,
            icons,
            warnings,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Everything that must hold before the first write.
    fn prepare(
        &self,
        input: &RawRenameInput,
        project_root: &Path,
    ) -> RebrandResult<(RenameSpec, SubstitutionPlan, String)> {
        if !self.filesystem.exists(project_root) {
            return Err(ApplicationError::ProjectNotFound {
                path: project_root.to_path_buf(),
            }
            .into());
        }

        let spec = InputValidator::validate(input, &self.settings.baseline, |path| {
            self.filesystem.is_readable_file(path)
        })?;
        let plan = SubstitutionPlan::for_spec(&spec)?;

        let manifest_path = project_root.join(&self.settings.manifest_file);
        if !self.filesystem.exists(&manifest_path) {
            return Err(ApplicationError::ManifestNotFound {
                path: manifest_path,
            }
            .into());
        }
        let bytes = self.filesystem.read(&manifest_path)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| ApplicationError::ManifestNotText { path: manifest_path })?;

        Ok((spec, plan, text))
    }

    fn scope(&self, project_root: &Path) -> TreeScope {
        let mut excluded = self.settings.excluded.clone();
        excluded.push(self.settings.tool_dir.clone());
        excluded.push(self.settings.manifest_file.clone());
        TreeScope {
            root: project_root.to_path_buf(),
            targets: self.settings.scan_targets.clone(),
            excluded,
        }
    }
}

fn transition(phase: &mut RenamePhase, next: RenamePhase) {
    info!(from = %phase, to = %next, "Phase transition");
    *phase = next;
}

fn file_warnings(tree: &TreeReport) -> Vec<RunWarning> {
    tree.records
        .iter()
        .filter_map(|record| match &record.outcome {
            FileOutcome::Failed { reason } => Some(RunWarning::FileFailed {
                path: record.path.clone(),
                reason: reason.clone(),
            }),
            _ => None,
        })
        .collect()
}
