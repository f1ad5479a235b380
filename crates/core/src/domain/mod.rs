// Domain Layer - Pure detection model and static query tables

pub mod error;
pub mod mode;
pub mod query;
pub mod record;
pub mod response;

// Re-exports
pub use error::DetectionError;
pub use mode::{Mode, Tool};
pub use query::{
    lists_authorized_device, queries_for, FieldExtractor, FieldQuery, Invocation, ToolConfig,
    DEBUG_QUERIES, FLASH_QUERIES, PROBE_ARGS,
};
pub use record::DeviceRecord;
pub use response::RawResponse;
