// Domain Error Types

use serde::Serialize;
use thiserror::Error;

/// Terminal outcome of a detection run that found nothing to read
///
/// This is the only engine-level error. Failed or unparsable field queries
/// never surface here; they are simply absent from the record.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionError {
    #[error("No device detected: neither fastboot nor adb reported an attached device")]
    NoDeviceDetected,
}
