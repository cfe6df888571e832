//! Application services - orchestrate use cases.
//!
//! `RenameService` is the entry point. The other services each own one phase
//! of a rename and are usable on their own.

pub mod dependency_refresh;
pub mod icon_pipeline;
pub mod rename_service;
pub mod tree_substitution;

pub use dependency_refresh::DependencyRefresher;
pub use icon_pipeline::{IconPhaseResult, IconPipeline, IconSettings, ManifestLease};
pub use rename_service::{RenameOptions, RenameService, RenameSettings};
pub use tree_substitution::{TreeScope, TreeSubstitutionEngine};
