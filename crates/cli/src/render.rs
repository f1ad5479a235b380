//! Console rendering of detection results

use droidprobe_core::application::{flash_mode_guide, GuideEntry};
use droidprobe_core::domain::{DeviceRecord, Mode};
use tabled::settings::Style;
use tabled::{Table, Tabled};

const RULE_WIDTH: usize = 50;

/// Shown when neither tool reports a device
pub const CONNECTION_CHECKLIST: [&str; 3] = [
    "1. 设备已正确连接到电脑",
    "2. 已安装 ADB 和 Fastboot 工具",
    "3. 设备已启用开发者选项和 USB 调试",
];

pub fn mode_banner(mode: Mode) -> &'static str {
    match mode {
        Mode::FlashMode => "设备处于 Fastboot 模式",
        Mode::DebugMode => "设备处于 ADB 模式",
        Mode::NotConnected => "未检测到设备连接！",
    }
}

/// Status line printed while the mode's fields are being read
pub fn reading_status(mode: Mode) -> Option<&'static str> {
    match mode {
        Mode::FlashMode => Some("正在通过 Fastboot 获取设备信息..."),
        Mode::DebugMode => Some("正在通过 ADB 获取设备信息..."),
        Mode::NotConnected => None,
    }
}

/// Framed `label: value` listing, or the "nothing obtained" notice
pub fn render_record(record: &DeviceRecord) -> String {
    if record.is_empty() {
        return "未能获取到设备信息！".to_string();
    }

    let rule = "-".repeat(RULE_WIDTH);
    let mut out = format!("设备信息:\n{}\n", rule);
    for (label, value) in record.iter() {
        out.push_str(&format!("{}: {}\n", label, value));
    }
    out.push_str(&rule);
    out
}

pub fn render_not_connected() -> String {
    let mut out = String::from("请确保：\n");
    out.push_str(&CONNECTION_CHECKLIST.join("\n"));
    out
}

#[derive(Tabled)]
struct GuideRow {
    #[tabled(rename = "品牌")]
    brand: &'static str,
    #[tabled(rename = "进入 Fastboot 模式的方法")]
    instructions: &'static str,
}

impl From<&GuideEntry> for GuideRow {
    fn from(entry: &GuideEntry) -> Self {
        Self {
            brand: entry.brand,
            instructions: entry.instructions,
        }
    }
}

pub fn render_guide() -> String {
    let rows: Vec<GuideRow> = flash_mode_guide().iter().map(GuideRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_record_keeps_order() {
        let mut record = DeviceRecord::new();
        record.push("设备型号", "Pixel 4a");
        record.push("Android版本", "13");

        let rendered = render_record(&record);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "设备信息:");
        assert_eq!(lines[1], "-".repeat(RULE_WIDTH));
        assert_eq!(lines[2], "设备型号: Pixel 4a");
        assert_eq!(lines[3], "Android版本: 13");
        assert_eq!(lines[4], "-".repeat(RULE_WIDTH));
    }

    #[test]
    fn test_render_empty_record() {
        assert_eq!(render_record(&DeviceRecord::new()), "未能获取到设备信息！");
    }

    #[test]
    fn test_render_not_connected_lists_checklist() {
        let rendered = render_not_connected();
        for item in CONNECTION_CHECKLIST {
            assert!(rendered.contains(item));
        }
    }

    #[test]
    fn test_render_guide_contains_every_brand() {
        let rendered = render_guide();
        for entry in flash_mode_guide() {
            assert!(rendered.contains(entry.brand));
        }
    }

    #[test]
    fn test_reading_status() {
        assert!(reading_status(Mode::NotConnected).is_none());
        assert!(reading_status(Mode::FlashMode).is_some());
    }
}
