// droidprobe Infrastructure - System Adapters
// Implements: CommandRunner

pub mod subprocess_runner;

pub use subprocess_runner::{RunError, SubprocessRunner};
