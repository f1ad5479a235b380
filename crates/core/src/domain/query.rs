// Query Table Domain Model
//
// Static, ordered query sets per mode. Order here is display order.

use super::mode::{Mode, Tool};
use std::time::Duration;

/// How the value of a field is pulled out of a raw response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldExtractor {
    /// `<token>: <value>` on one line of the output (fastboot getvar)
    PrefixedValue(&'static str),
    /// The whole response is the value (adb getprop)
    Verbatim,
}

impl FieldExtractor {
    /// Extract the field value from trimmed response text
    ///
    /// Returns `None` when the expected prefix is missing or the value is
    /// empty.
    pub fn extract(&self, text: &str) -> Option<String> {
        let value = match self {
            FieldExtractor::PrefixedValue(token) => find_prefixed_value(text, token)?,
            FieldExtractor::Verbatim => text.trim(),
        };

        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// First line carrying `<token>: `, at line start or after whitespace
fn find_prefixed_value<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    let prefix = format!("{}: ", token);

    text.lines().find_map(|line| {
        line.match_indices(&prefix).find_map(|(idx, _)| {
            let at_boundary = line[..idx]
                .chars()
                .next_back()
                .map_or(true, |c| c.is_whitespace() || c == ')');
            at_boundary.then(|| line[idx + prefix.len()..].trim())
        })
    })
}

/// One field query: which tool to call, with what arguments, and how to parse it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldQuery {
    /// Stable machine key
    pub key: &'static str,
    /// Display label, used as the record key
    pub label: &'static str,
    pub tool: Tool,
    pub args: &'static [&'static str],
    pub extractor: FieldExtractor,
}

/// Flash-mode queries (fastboot getvar)
pub const FLASH_QUERIES: &[FieldQuery] = &[
    FieldQuery {
        key: "product",
        label: "产品名称",
        tool: Tool::Fastboot,
        args: &["getvar", "product"],
        extractor: FieldExtractor::PrefixedValue("product"),
    },
    FieldQuery {
        key: "serialno",
        label: "序列号",
        tool: Tool::Fastboot,
        args: &["getvar", "serialno"],
        extractor: FieldExtractor::PrefixedValue("serialno"),
    },
    FieldQuery {
        key: "secure",
        label: "安全状态",
        tool: Tool::Fastboot,
        args: &["getvar", "secure"],
        extractor: FieldExtractor::PrefixedValue("secure"),
    },
    FieldQuery {
        key: "version-bootloader",
        label: "Bootloader版本",
        tool: Tool::Fastboot,
        args: &["getvar", "version-bootloader"],
        extractor: FieldExtractor::PrefixedValue("version-bootloader"),
    },
];

/// Debug-mode queries (adb getprop)
pub const DEBUG_QUERIES: &[FieldQuery] = &[
    FieldQuery {
        key: "model",
        label: "设备型号",
        tool: Tool::Adb,
        args: &["shell", "getprop", "ro.product.model"],
        extractor: FieldExtractor::Verbatim,
    },
    FieldQuery {
        key: "android-version",
        label: "Android版本",
        tool: Tool::Adb,
        args: &["shell", "getprop", "ro.build.version.release"],
        extractor: FieldExtractor::Verbatim,
    },
    FieldQuery {
        key: "build-id",
        label: "系统版本号",
        tool: Tool::Adb,
        args: &["shell", "getprop", "ro.build.display.id"],
        extractor: FieldExtractor::Verbatim,
    },
    FieldQuery {
        key: "cpu-abi",
        label: "CPU架构",
        tool: Tool::Adb,
        args: &["shell", "getprop", "ro.product.cpu.abi"],
        extractor: FieldExtractor::Verbatim,
    },
];

/// Arguments of the "list devices" probe, identical for both tools
pub const PROBE_ARGS: &[&str] = &["devices"];

/// State column `adb devices` prints for an attached, authorized device
pub const AUTHORIZED_DEVICE_STATE: &str = "device";

/// Query set for a mode, in display order
pub fn queries_for(mode: Mode) -> &'static [FieldQuery] {
    match mode {
        Mode::FlashMode => FLASH_QUERIES,
        Mode::DebugMode => DEBUG_QUERIES,
        Mode::NotConnected => &[],
    }
}

/// Whether `adb devices` output lists at least one authorized device
///
/// The header line and devices in `unauthorized`/`offline` state do not count.
pub fn lists_authorized_device(adb_devices_output: &str) -> bool {
    adb_devices_output
        .lines()
        .filter(|line| !line.starts_with("List of devices"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .any(|state| state == AUTHORIZED_DEVICE_STATE)
}

/// Fully-formed external invocation: program plus argument vector, no shell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Where the external tools live and how long to wait for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub fastboot: String,
    pub adb: String,
    /// None waits forever (a hung tool blocks the run)
    pub timeout: Option<Duration>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            fastboot: Tool::Fastboot.default_program().to_string(),
            adb: Tool::Adb.default_program().to_string(),
            timeout: None,
        }
    }
}

impl ToolConfig {
    pub fn program(&self, tool: Tool) -> &str {
        match tool {
            Tool::Fastboot => &self.fastboot,
            Tool::Adb => &self.adb,
        }
    }

    pub fn invocation(&self, tool: Tool, args: &[&str]) -> Invocation {
        Invocation::new(self.program(tool), args.iter().copied())
    }

    /// Reject configurations that could never produce a usable run
    pub fn validate(&self) -> crate::Result<()> {
        for tool in [Tool::Fastboot, Tool::Adb] {
            if self.program(tool).trim().is_empty() {
                return Err(crate::AppError::Config(format!(
                    "program path for {} is empty",
                    tool
                )));
            }
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(crate::AppError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_value_extraction() {
        let extractor = FieldExtractor::PrefixedValue("product");
        assert_eq!(
            extractor.extract("product: sunfish\nFinished. Total time: 0.001s"),
            Some("sunfish".to_string())
        );
    }

    #[test]
    fn test_prefixed_value_after_bootloader_tag() {
        let extractor = FieldExtractor::PrefixedValue("secure");
        assert_eq!(
            extractor.extract("(bootloader) secure: yes\nOKAY [  0.001s]"),
            Some("yes".to_string())
        );
    }

    #[test]
    fn test_prefix_must_sit_on_token_boundary() {
        let extractor = FieldExtractor::PrefixedValue("bootloader");
        assert_eq!(extractor.extract("version-bootloader: s5-0.3"), None);
    }

    #[test]
    fn test_missing_prefix_yields_none() {
        let extractor = FieldExtractor::PrefixedValue("serialno");
        assert_eq!(extractor.extract("getvar:serialno FAILED"), None);
        assert_eq!(extractor.extract("serialno: "), None);
    }

    #[test]
    fn test_verbatim_extraction() {
        assert_eq!(
            FieldExtractor::Verbatim.extract("Pixel 4a"),
            Some("Pixel 4a".to_string())
        );
        assert_eq!(FieldExtractor::Verbatim.extract("  "), None);
    }

    #[test]
    fn test_query_tables_match_modes() {
        assert!(FLASH_QUERIES.iter().all(|q| q.tool == Tool::Fastboot));
        assert!(DEBUG_QUERIES.iter().all(|q| q.tool == Tool::Adb));
        assert!(FLASH_QUERIES
            .iter()
            .all(|q| matches!(q.extractor, FieldExtractor::PrefixedValue(t) if t == q.args[1])));
        assert!(queries_for(Mode::NotConnected).is_empty());
    }

    #[test]
    fn test_adb_device_list_parsing() {
        assert!(lists_authorized_device(
            "List of devices attached\nR58M12345\tdevice"
        ));
        assert!(!lists_authorized_device("List of devices attached"));
        assert!(!lists_authorized_device(
            "List of devices attached\nR58M12345\tunauthorized"
        ));
        assert!(!lists_authorized_device(
            "List of devices attached\nemulator-5554\toffline"
        ));
    }

    #[test]
    fn test_invocation_display() {
        let config = ToolConfig::default();
        let invocation = config.invocation(Tool::Adb, &["shell", "getprop", "ro.product.model"]);
        assert_eq!(invocation.to_string(), "adb shell getprop ro.product.model");
    }

    #[test]
    fn test_tool_config_validation() {
        assert!(ToolConfig::default().validate().is_ok());

        let empty_adb = ToolConfig {
            adb: " ".to_string(),
            ..ToolConfig::default()
        };
        assert!(matches!(
            empty_adb.validate(),
            Err(crate::AppError::Config(_))
        ));

        let zero_timeout = ToolConfig {
            timeout: Some(Duration::ZERO),
            ..ToolConfig::default()
        };
        assert!(zero_timeout.validate().is_err());
    }
}
