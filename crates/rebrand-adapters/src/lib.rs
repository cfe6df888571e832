//! Infrastructure adapters for rebrand.
//!
//! This crate implements the ports defined in `rebrand-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod runner;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use runner::{ProcessRunner, ScriptedRunner};
