// Application Layer - Use Cases

pub mod detection;
pub mod guide;

// Re-exports
pub use detection::{DetectionEvent, DetectionReport, DetectionService, SkipReason};
pub use guide::{flash_mode_guide, GuideEntry};
