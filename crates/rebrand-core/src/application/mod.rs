//! Application layer for rebrand.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RenameService and its phases)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! identity rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DependencyRefresher, IconPhaseResult, IconPipeline, IconSettings, ManifestLease,
    RenameOptions, RenameService, RenameSettings, TreeScope, TreeSubstitutionEngine,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandOutcome, CommandRunner, CommandSpec, ProjectFilesystem};

pub use error::ApplicationError;
