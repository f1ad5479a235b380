// Flash-mode entry guide
// Static reference data for the presentation layer; detection never reads it.

use serde::Serialize;

/// How to reach flash mode on one family of devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuideEntry {
    pub brand: &'static str,
    pub instructions: &'static str,
}

const FLASH_MODE_GUIDE: &[GuideEntry] = &[
    GuideEntry {
        brand: "小米/红米",
        instructions: "关机状态下，同时长按【音量下键】+【电源键】",
    },
    GuideEntry {
        brand: "华为/荣耀",
        instructions: "关机状态下，同时长按【音量上键】+【音量下键】+【电源键】",
    },
    GuideEntry {
        brand: "OPPO",
        instructions: "关机状态下，同时长按【音量下键】+【电源键】",
    },
    GuideEntry {
        brand: "VIVO",
        instructions: "关机状态下，同时长按【音量上键】+【电源键】",
    },
    GuideEntry {
        brand: "三星",
        instructions: "关机状态下，同时长按【音量上键】+【音量下键】+【Home键】",
    },
    GuideEntry {
        brand: "魅族",
        instructions: "关机状态下，同时长按【音量下键】+【电源键】",
    },
    GuideEntry {
        brand: "一加",
        instructions: "关机状态下，同时长按【音量上键】+【音量下键】+【电源键】",
    },
    GuideEntry {
        brand: "Realme",
        instructions: "关机状态下，同时长按【音量下键】+【电源键】",
    },
    GuideEntry {
        brand: "其他通用方法",
        instructions: "1. 关机状态下尝试音量键+电源键组合\n2. 开机状态下，打开开发者选项，点击重启到bootloader",
    },
];

/// Brand -> instructions table, in display order
pub fn flash_mode_guide() -> &'static [GuideEntry] {
    FLASH_MODE_GUIDE
}
