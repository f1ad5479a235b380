//! droidprobe CLI - identify an attached Android device over fastboot or adb

mod logging;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use droidprobe_core::application::{DetectionEvent, DetectionService};
use droidprobe_core::domain::{Mode, Tool, ToolConfig};
use droidprobe_core::port::SystemTimeProvider;
use droidprobe_infra_system::SubprocessRunner;

#[derive(Parser)]
#[command(name = "droidprobe")]
#[command(about = "Identify an attached Android device via fastboot or adb", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// fastboot program (name on PATH or full path)
    #[arg(long, global = true, env = "DROIDPROBE_FASTBOOT", default_value = "fastboot")]
    fastboot: String,

    /// adb program (name on PATH or full path)
    #[arg(long, global = true, env = "DROIDPROBE_ADB", default_value = "adb")]
    adb: String,

    /// Give up on a tool invocation after this many seconds (default: wait forever)
    #[arg(long, global = true, env = "DROIDPROBE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the device mode and read its identifying properties (default)
    Detect,

    /// Show how to enter flash mode on common brands
    Guide,
}

impl Cli {
    fn tool_config(&self) -> Result<ToolConfig> {
        let tools = ToolConfig {
            fastboot: shellexpand::tilde(&self.fastboot).into_owned(),
            adb: shellexpand::tilde(&self.adb).into_owned(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        };
        tools.validate().context("Invalid tool configuration")?;
        Ok(tools)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;
    info!("droidprobe v{} starting", droidprobe_core::VERSION);

    match cli.command {
        Some(Commands::Guide) => {
            show_guide(cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Detect) | None => detect(&cli).await,
    }
}

async fn detect(cli: &Cli) -> Result<ExitCode> {
    let tools = cli.tool_config()?;
    info!(
        fastboot = %tools.program(Tool::Fastboot),
        adb = %tools.program(Tool::Adb),
        timeout = ?tools.timeout,
        "Starting detection"
    );

    let service = DetectionService::new(
        Arc::new(SubprocessRunner::from_config(&tools)),
        Arc::new(SystemTimeProvider),
        tools,
    );

    let human = !cli.json;
    if human {
        println!("{}", "正在检查设备连接状态...".cyan());
    }

    let report = service
        .detect_and_extract_with_progress(|event| {
            if let (true, DetectionEvent::ModeDetected(mode)) = (human, event) {
                if let Some(status) = render::reading_status(*mode) {
                    println!("{}", render::mode_banner(*mode).green().bold());
                    println!("{}", status.cyan());
                }
            }
        })
        .await;

    if cli.json {
        println!("{}", report.to_json_pretty()?);
    } else if report.mode == Mode::NotConnected {
        println!("{}", render::mode_banner(report.mode).red().bold());
        println!("{}", render::render_not_connected());
    } else {
        println!();
        let rendered = render::render_record(&report.record);
        if report.record.is_empty() {
            println!("{}", rendered.yellow());
        } else {
            println!("{}", rendered);
        }
    }

    // No device is an expected outcome, reported through the exit status
    Ok(match report.into_result() {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}

fn show_guide(json: bool) -> Result<()> {
    if json {
        let guide = droidprobe_core::application::flash_mode_guide();
        println!("{}", serde_json::to_string_pretty(guide)?);
        return Ok(());
    }

    println!("{}", "各品牌手机进入Fastboot模式的方法：".cyan().bold());
    println!();
    println!("{}", render::render_guide());
    Ok(())
}
