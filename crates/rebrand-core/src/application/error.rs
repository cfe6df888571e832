//! Application layer errors.
//!
//! These errors represent failures in orchestration, not identity rules.
//! Validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during rename orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The project has no manifest where one was expected.
    #[error("Manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// The manifest is not valid UTF-8 text.
    #[error("Manifest at {path} is not valid UTF-8")]
    ManifestNotText { path: PathBuf },

    /// The manifest could not be put back after the icon phase.
    #[error("Failed to restore manifest at {path}: {reason}")]
    ManifestRestoreFailed { path: PathBuf, reason: String },

    /// An external command could not be started at all.
    #[error("Could not start `{command}`: {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// Project directory is missing or not a directory.
    #[error("Project directory not found: {path}")]
    ProjectNotFound { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::ManifestNotFound { path } => vec![
                format!("Expected a manifest at {}", path.display()),
                "Run rebrand from the project root, or pass --project-dir".into(),
            ],
            Self::ManifestNotText { .. } => vec![
                "The manifest must be a UTF-8 text file".into(),
            ],
            Self::ManifestRestoreFailed { path, .. } => vec![
                format!("{} may still contain icon generator settings", path.display()),
                "Restore it from version control before building".into(),
                "The textual rename itself has already been applied".into(),
            ],
            Self::CommandSpawnFailed { command, .. } => vec![
                format!("Ensure `{command}` is installed and on your PATH"),
            ],
            Self::ProjectNotFound { path } => vec![
                format!("No directory at {}", path.display()),
                "Pass the project root with --project-dir".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestNotFound { .. } | Self::ProjectNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::ManifestNotText { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. }
            | Self::ManifestRestoreFailed { .. }
            | Self::CommandSpawnFailed { .. } => ErrorCategory::Internal,
        }
    }
}
