//! Implementation of the rename run.
//!
//! Responsibility: translate CLI arguments into a `RawRenameInput`, call the
//! core rename service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use rebrand_adapters::{LocalFilesystem, ProcessRunner};
use rebrand_core::{
    application::{RenameOptions, RenameService},
    domain::{IconRole, RawRenameInput},
};

use crate::{
    cli::{RenameArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute a rename.
///
/// 1. Build core settings from config
/// 2. Resolve the project directory and icon paths
/// 3. Run the rename service
/// 4. Render the summary
#[instrument(skip_all, fields(name = %args.name, app_id = %args.app_id))]
pub fn execute(
    args: RenameArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let settings = config.to_settings()?;
    let project_dir = absolute(&args.project_dir)?;
    let input = build_input(&args)?;
    let options = RenameOptions {
        dry_run: args.dry_run,
        skip_refresh: args.no_refresh,
        skip_icons: args.no_icons,
    };

    debug!(
        project = %project_dir.display(),
        icons = input.icons.len(),
        ?options,
        "Rename resolved"
    );

    let service = RenameService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ProcessRunner::new()),
        settings,
    );

    if !args.dry_run {
        output.header(&format!("Renaming to '{}' ({})...", args.name, args.app_id))?;
    }
    info!(project = %project_dir.display(), "Rename started");

    let summary = service
        .rename(&input, &project_dir, options)
        .map_err(CliError::Core)?;

    info!(
        changed = summary.tree.changed(),
        warnings = summary.warnings.len(),
        "Rename completed"
    );

    let headline = format!("Project renamed to '{}' ({})", args.name, args.app_id);
    output.summary(&summary, &headline)?;

    if summary.has_warnings() && !global.quiet {
        output.print("")?;
        output.print("Some follow-up steps failed; run them by hand once fixed.")?;
    }

    Ok(())
}

/// Turn flags into the unvalidated core input. Icon paths are resolved
/// against the working directory, not the project directory.
fn build_input(args: &RenameArgs) -> CliResult<RawRenameInput> {
    let mut input = RawRenameInput::new(args.name.clone(), args.app_id.clone());
    input.description = args.description.clone();
    input.version = args.version.clone();
    input.old_app_id = args.old_app_id.clone();
    input.old_name = args.old_name.clone();

    let icons = [
        (IconRole::Main, &args.icon),
        (IconRole::AdaptiveBackground, &args.adaptive_background),
        (IconRole::AdaptiveForeground, &args.adaptive_foreground),
        (IconRole::AdaptiveMonochrome, &args.adaptive_monochrome),
        (IconRole::Notification, &args.notification_icon),
    ];
    for (role, path) in icons {
        if let Some(path) = path {
            input = input.with_icon(role, absolute(path)?);
        }
    }

    Ok(input)
}

fn absolute(path: &Path) -> CliResult<PathBuf> {
    std::path::absolute(path).map_err(|e| CliError::IoError {
        message: format!("Cannot resolve path '{}': {e}", path.display()),
        source: e,
    })
}
