//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `rebrand-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ProjectFilesystem`: reading, listing and atomically rewriting project files
//!   - `CommandRunner`: blocking execution of external build tools
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandOutcome, CommandRunner, CommandSpec, ProjectFilesystem};

#[cfg(test)]
pub use output::{MockCommandRunner, MockProjectFilesystem};
