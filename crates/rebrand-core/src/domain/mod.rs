//! Core domain layer for rebrand.
//!
//! This module contains pure business logic with no I/O. Reading and writing
//! the project tree and running external tools happen behind the ports
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or network calls
//! - **No external crates**: Only std library + thiserror + serde
//! - **Immutable values**: `RenameSpec` is built once by the validator

pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    FileChangeRecord, FileOutcome, ICON_DIRECTIVES_KEY, IconOutcome, IconPlatforms, IconSet,
    Identity, ManifestEditor, ManifestSnapshot, RenamePhase, RenameSpec, RunSummary, RunWarning,
    Substituted, SubstitutionPlan, SubstitutionRule, TreeReport,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{AppId, AppName, IconRole, Version, snake_case};

pub use validation::{InputValidator, RawRenameInput};

/// The identity a freshly generated template ships with.
pub fn template_identity() -> Identity {
    Identity {
        app_id: AppId::new_unchecked("com.example.purplestack"),
        app_name: AppName::new_unchecked("Purplestack"),
        snake_name: "purplestack".into(),
    }
}
