//! benchlog command-line interface
//!
//! Two entry points into the acquisition library plus a port lister:
//! `sweep` runs a bounded setpoint sweep, `monitor` logs telemetry
//! indefinitely under the crash-restart supervisor while relaying stdin
//! commands to the rig, and `ports` enumerates serial ports. `--demo`
//! runs either loop against the built-in simulated rig.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use benchlog_core::acquisition::run_sweep;
use benchlog_core::config::{MonitorConfig, SessionConfig, SweepConfig};
use benchlog_core::datalog::LogWriter;
use benchlog_core::demo::DemoDevice;
use benchlog_core::protocol::{list_ports, Session};
use benchlog_core::relay::spawn_stdin_relay;
use benchlog_core::supervisor::run_supervised;

/// Sensor fields the demo rig emits per variant
const DEMO_SWEEP_CHANNELS: usize = 4;
const DEMO_MONITOR_CHANNELS: usize = 5;

#[derive(Parser)]
#[command(
    name = "benchlog",
    version,
    about = "Serial telemetry logger for bench-top rigs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a fixed setpoint sweep, logging to resultsDD_MM_YY.txt
    Sweep(RunArgs),
    /// Log telemetry continuously, relaying stdin commands to the rig
    Monitor(RunArgs),
    /// List available serial ports
    Ports,
}

#[derive(Args)]
struct RunArgs {
    /// Serial port (e.g. /dev/ttyUSB0 or COM3)
    #[arg(long)]
    port: Option<String>,

    /// Baud rate
    #[arg(long)]
    baud: Option<u32>,

    /// Read timeout in seconds
    #[arg(long)]
    read_timeout: Option<u64>,

    /// Directory log files are written to
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Reads per sweep level (sweep only)
    #[arg(long)]
    reads: Option<u32>,

    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run against the built-in demo rig instead of hardware
    #[arg(long)]
    demo: bool,
}

/// On-disk configuration, one object per concern
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    session: SessionConfig,
    sweep: SweepConfig,
    monitor: MonitorConfig,
}

/// Merge precedence: defaults, then config file, then flags.
fn resolve(args: &RunArgs) -> Result<FileConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<FileConfig>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => FileConfig::default(),
    };

    if let Some(port) = &args.port {
        config.session.port = port.clone();
    }
    if let Some(baud) = args.baud {
        config.session.baud_rate = baud;
    }
    if let Some(secs) = args.read_timeout {
        config.session.read_timeout_secs = secs;
    }
    if let Some(dir) = &args.log_dir {
        config.sweep.log_dir = dir.clone();
        config.monitor.log_dir = dir.clone();
    }
    if let Some(reads) = args.reads {
        config.sweep.reads_per_level = reads;
    }

    if !args.demo && config.session.port.is_empty() {
        bail!("no serial port configured; pass --port or use --demo");
    }
    Ok(config)
}

async fn sweep(args: RunArgs) -> Result<()> {
    let config = resolve(&args)?;
    tracing::info!(demo = args.demo, "starting sweep run");
    let log = LogWriter::sweep(&config.sweep.log_dir);

    if args.demo {
        let host = DemoDevice::new(DEMO_SWEEP_CHANNELS, Duration::from_millis(250)).spawn();
        let session = Session::from_stream(host, config.session.read_timeout());
        run_sweep(session, &config.sweep, &log).await?;
    } else {
        let session = Session::open(&config.session)
            .await
            .context("opening serial port")?;
        run_sweep(session, &config.sweep, &log).await?;
    }

    println!("Sweep complete: {}", log.current_path().display());
    Ok(())
}

async fn monitor(args: RunArgs) -> Result<()> {
    let config = resolve(&args)?;
    tracing::info!(demo = args.demo, "starting monitor run");
    let log = LogWriter::daily(&config.monitor.log_dir);
    let pause = config.monitor.command_pause();
    let restart_delay = config.monitor.restart_delay();
    let read_timeout = config.session.read_timeout();

    // One stdin relay per session; the previous one is abandoned on
    // restart and exits once its channel is gone.
    let attach_relay = move |tx| {
        spawn_stdin_relay(tx, pause);
    };

    if args.demo {
        run_supervised(
            move || {
                let host = DemoDevice::new(DEMO_MONITOR_CHANNELS, Duration::from_millis(500))
                    .ack_commands()
                    .spawn();
                std::future::ready(Ok(Session::from_stream(host, read_timeout)))
            },
            attach_relay,
            restart_delay,
            &log,
        )
        .await?;
    } else {
        let session_config = config.session.clone();
        run_supervised(
            move || {
                let session_config = session_config.clone();
                async move { Session::open(&session_config).await }
            },
            attach_relay,
            restart_delay,
            &log,
        )
        .await?;
    }
    Ok(())
}

fn ports() -> Result<()> {
    let ports = list_ports();
    if ports.is_empty() {
        println!("No serial ports found.");
        return Ok(());
    }
    for port in ports {
        match (port.vid, port.pid) {
            (Some(vid), Some(pid)) => println!(
                "{}  [{vid:04x}:{pid:04x}] {}",
                port.name,
                port.product.unwrap_or_default()
            ),
            _ => println!("{}", port.name),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Sweep(args) => sweep(args).await,
        Command::Monitor(args) => monitor(args).await,
        Command::Ports => ports(),
    }
}
