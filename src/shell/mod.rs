//! Child-process execution and host probing.

pub mod command;
pub mod heartbeat;
pub mod platform;

pub use command::{run_captured, run_streaming, RunResult};
pub use heartbeat::Heartbeat;
pub use platform::{command_exists, find_on_path, is_elevated};
