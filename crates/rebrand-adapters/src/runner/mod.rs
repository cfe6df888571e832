//! Command runner adapters.

mod process;
mod scripted;

pub use process::ProcessRunner;
pub use scripted::{ScriptedRunner, ScriptedStep};
