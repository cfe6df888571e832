//! Rebrand Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for `rebrand`,
//! which turns a freshly generated app template into a uniquely named
//! project, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           rebrand-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (RenameService, TreeSubstitution,      │
//! │   IconPipeline, DependencyRefresher)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: ProjectFilesystem, Runner)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    rebrand-adapters (Infrastructure)    │
//! │  (LocalFilesystem, ProcessRunner, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (RenameSpec, SubstitutionPlan, Manifest)│
//! │        No I/O, no processes             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use rebrand_core::{
//!     application::{RenameOptions, RenameService, RenameSettings},
//!     domain::RawRenameInput,
//! };
//!
//! // 1. Describe the new identity
//! let input = RawRenameInput::new("Task Flow", "com.acme.taskflow");
//!
//! // 2. Use application service (with injected adapters)
//! let service = RenameService::new(filesystem, runner, RenameSettings::default());
//! let summary = service
//!     .rename(&input, Path::new("."), RenameOptions::default())
//!     .unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        RenameOptions, RenameService, RenameSettings,
        ports::{CommandOutcome, CommandRunner, CommandSpec, ProjectFilesystem},
    };
    pub use crate::domain::{
        AppId, AppName, IconRole, IconSet, Identity, RawRenameInput, RenamePhase, RenameSpec,
        RunSummary, RunWarning, SubstitutionPlan, TreeReport, Version, template_identity,
    };
    pub use crate::error::{RebrandError, RebrandResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
