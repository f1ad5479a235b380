//! Fake fastboot/adb programs for end-to-end tests
//!
//! Each fake tool is a `/bin/sh` script that answers by `case "$*"` and logs
//! every invocation to a shared call log.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use droidprobe_core::application::DetectionService;
use droidprobe_core::domain::ToolConfig;
use droidprobe_core::port::time_provider::mocks::FixedTimeProvider;
use droidprobe_infra_system::SubprocessRunner;

static EXEC_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests within one binary
///
/// Writing a script while another thread forks leaks the write handle into
/// the child and makes exec fail with ETXTBSY.
pub fn exclusive() -> MutexGuard<'static, ()> {
    EXEC_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct FakeToolDir {
    root: PathBuf,
}

impl FakeToolDir {
    pub fn new(test_name: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "droidprobe_it_{}_{}",
            test_name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn call_log(&self) -> PathBuf {
        self.root.join("calls.log")
    }

    /// Write an executable fake tool; `cases` is the body of a `case "$*" in`
    pub fn tool(&self, name: &str, cases: &str) -> String {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        let script = format!(
            "#!/bin/sh\necho \"{name} $*\" >> '{log}'\ncase \"$*\" in\n{cases}\n  *) exit 1 ;;\nesac\n",
            name = name.rsplit('/').next().unwrap_or(name),
            log = self.call_log().display(),
            cases = cases,
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        path.to_string_lossy().into_owned()
    }

    /// Invocations seen by all fake tools, in order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.call_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn missing(&self, name: &str) -> String {
        self.root.join(name).to_string_lossy().into_owned()
    }
}

impl Drop for FakeToolDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

pub fn service(fastboot: String, adb: String, timeout: Option<Duration>) -> DetectionService {
    let tools = ToolConfig {
        fastboot,
        adb,
        timeout,
    };
    DetectionService::new(
        Arc::new(SubprocessRunner::from_config(&tools)),
        Arc::new(FixedTimeProvider::from_millis(1_700_000_000_000)),
        tools,
    )
}

pub const FASTBOOT_DEVICE: &str = r#"  "devices") printf '0123456789ABCDEF\tfastboot\n' ;;
  "getvar product") echo "product: sunfish" >&2; echo "Finished. Total time: 0.001s" >&2 ;;
  "getvar serialno") echo "serialno: 0123456789ABCDEF" >&2 ;;
  "getvar secure") echo "secure: yes" >&2 ;;
  "getvar version-bootloader") echo "version-bootloader: s5-0.3-7062598" >&2 ;;"#;

pub const FASTBOOT_NO_DEVICE: &str = r#"  "devices") exit 0 ;;"#;

pub const ADB_DEVICE: &str = r#"  "devices") printf 'List of devices attached\nR58M12345\tdevice\n\n' ;;
  "shell getprop ro.product.model") echo "Pixel 4a" ;;
  "shell getprop ro.build.version.release") echo "13" ;;
  "shell getprop ro.build.display.id") echo "TQ3A.230805.001" ;;
  "shell getprop ro.product.cpu.abi") echo "arm64-v8a" ;;"#;

pub const ADB_NO_DEVICE: &str = r#"  "devices") printf 'List of devices attached\n\n' ;;"#;
