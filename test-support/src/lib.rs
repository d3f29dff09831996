//! Test support utilities.
//!
//! Shared by the integration and behavioural tests of the workspace.

pub mod env_guard;
pub mod logging;
pub mod project;
pub mod recording;

pub use env_guard::EnvGuard;
pub use project::{TestOptions, temp_config};
pub use recording::{LifecycleLog, RecordingProject, Script, Stage, recording_config};
