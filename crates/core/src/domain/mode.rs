// Device Mode Domain Model

use serde::{Deserialize, Serialize};

/// Connectivity state of the attached device
///
/// Exactly one mode is computed per detection run. The flash-mode probe runs
/// first, so `FlashMode` wins whenever both tools would report a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Bootloader state, queried through `fastboot`
    FlashMode,
    /// Running OS with USB debugging, queried through `adb`
    DebugMode,
    NotConnected,
}

impl Mode {
    /// Whether a device was found at all
    pub fn is_connected(&self) -> bool {
        !matches!(self, Mode::NotConnected)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::FlashMode => write!(f, "FLASH_MODE"),
            Mode::DebugMode => write!(f, "DEBUG_MODE"),
            Mode::NotConnected => write!(f, "NOT_CONNECTED"),
        }
    }
}

/// External command-line tool used to talk to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Fastboot,
    Adb,
}

impl Tool {
    /// Conventional program name, resolved through PATH when no override is set
    pub fn default_program(&self) -> &'static str {
        match self {
            Tool::Fastboot => "fastboot",
            Tool::Adb => "adb",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_program())
    }
}
