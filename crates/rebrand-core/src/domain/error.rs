// ============================================================================
// domain/error.rs - IDENTITY VALIDATION ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported from pure code, no I/O handles inside)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid app id '{value}': {reason}")]
    InvalidAppId { value: String, reason: String },

    #[error("Invalid app name '{value}': {reason}")]
    InvalidAppName { value: String, reason: String },

    #[error("Invalid version '{value}': expected MAJOR.MINOR.PATCH with optional +BUILD")]
    InvalidVersion { value: String },

    #[error("Icon file(s) missing or unreadable: {}", display_paths(paths))]
    MissingIconFiles { paths: Vec<PathBuf> },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Planning Errors
    // ========================================================================
    #[error(
        "Substitution rule '{shorter}' is ordered before '{longer}', which contains it; \
         the longer rule would never match"
    )]
    RuleOrderViolation { shorter: String, longer: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl DomainError {
    /// Name of the input field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidAppId { .. } => Some("app-id"),
            Self::InvalidAppName { .. } => Some("name"),
            Self::InvalidVersion { .. } => Some("version"),
            Self::MissingIconFiles { .. } => Some("icon"),
            Self::MissingRequiredField { field } => Some(field),
            Self::RuleOrderViolation { .. } => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidAppId { .. } => vec![
                "App ids are reverse-domain: at least two dot-separated segments".into(),
                "Each segment starts with a lowercase letter, then letters or digits".into(),
                "Example: --app-id com.acme.taskflow".into(),
            ],
            Self::InvalidAppName { .. } => vec![
                "The display name must contain at least one letter or digit".into(),
                "Example: --name \"Task Flow\"".into(),
            ],
            Self::InvalidVersion { .. } => vec![
                "Use a full semantic version, e.g. 1.2.3".into(),
                "A numeric build number may follow a '+', e.g. 1.2.3+4".into(),
            ],
            Self::MissingIconFiles { paths } => {
                let mut out = vec!["These icon files could not be read:".to_string()];
                out.extend(paths.iter().map(|p| format!("  • {}", p.display())));
                out.push("Paths are resolved relative to the current directory".into());
                out
            }
            Self::MissingRequiredField { field } => vec![format!("Provide --{field}")],
            Self::RuleOrderViolation { .. } => vec![
                "List longer literals before the shorter ones they contain".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RuleOrderViolation { .. } => ErrorCategory::Planning,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Planning,
}
