//! Logging setup
//!
//! Logs always go to stderr so stdout carries only the report.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// # Environment Variables
///
/// - `RUST_LOG`: filter directives, overrides `verbosity`
/// - `DROIDPROBE_LOG_FORMAT`: `json` for structured output, anything else is pretty
pub fn init_logging(verbosity: u8) -> Result<()> {
    let default_directive = match verbosity {
        0 => "droidprobe=warn",
        1 => "droidprobe=info",
        _ => "droidprobe=debug",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .context("Failed to create env filter")?;

    let log_format =
        std::env::var("DROIDPROBE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let installed = match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };

    installed.context("Failed to install tracing subscriber")
}
