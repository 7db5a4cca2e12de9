//! CLI entrypoint for netlog-bridge
//!
//! Wires the local net-log service into the Lua script host using
//! dependency injection, runs the operator's control scripts, then pumps
//! pending stop completions until every callback has fired.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use netlog_application::NetLogServicePort;
use netlog_infrastructure::{ConfigLoader, LocalNetLogService, NetLogScriptHost};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "netlog-bridge",
    about = "Lua script host for net-log capture control",
    version
)]
struct Cli {
    /// Lua scripts to execute, in order
    script: Vec<PathBuf>,

    /// Lua chunk to execute after the scripts
    #[arg(short, long, value_name = "CHUNK")]
    eval: Option<String>,

    /// Explicit config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip config files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load config: {}", e))?
    };

    // Initialize logging; verbosity flags override the configured filter
    let filter = match cli.verbose {
        0 => EnvFilter::new(&config.log_filter),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.script.is_empty() && cli.eval.is_none() {
        bail!("nothing to run; pass a script file or --eval");
    }

    // === Dependency Injection ===
    let service = Arc::new(LocalNetLogService::new());
    let host = NetLogScriptHost::new(Arc::clone(&service) as Arc<dyn NetLogServicePort>)?;

    for path in &cli.script {
        info!(script = %path.display(), "running script");
        host.load_script(path)?;
    }
    if let Some(chunk) = &cli.eval {
        host.exec(chunk)?;
    }

    // Pump stop completions until every parked callback has fired
    host.drain_completions()?;
    while host.pending_stop_callbacks() > 0 {
        tokio::time::sleep(Duration::from_millis(config.pump_interval_ms)).await;
        host.drain_completions()?;
    }

    if service.is_dynamic_logging() {
        warn!("exiting with a capture still active");
    }

    Ok(())
}
