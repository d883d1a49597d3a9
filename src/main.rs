//! livecheck: dampened ICMP/DNS reachability monitor.
//!
//! Checks whether one or more destinations are alive by probing them at a
//! fixed interval and running the results through a hysteresis state
//! machine, so a target is only declared dead (or resurrected) after a
//! configurable number of consecutive same-polarity checks.
//!
//! ```text
//! livecheck -v -t 1 -i 1 1.1.1.1
//! livecheck -v -m dns -d 1.1.1.1 -s 10.0.2.15 www.w3.org
//! ```

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livecheck::config::{loader, validate_config, ConfigError, MonitorConfig, ProbeMode, TargetSpec};
use livecheck::lifecycle::Shutdown;
use livecheck::monitor::TargetMonitor;
use livecheck::notify::LogNotifier;
use livecheck::probe::{PingSettings, ProbeKind};

#[derive(Parser)]
#[command(name = "livecheck")]
#[command(about = "Checks whether a destination is alive", long_about = None)]
struct Cli {
    /// Activates verbose output (per-check lines).
    #[arg(short, long)]
    verbose: bool,

    /// Activates very verbose output (probe-level debugging; implies -v).
    #[arg(short = 'V', long)]
    very_verbose: bool,

    /// Interval of polls in seconds.
    #[arg(short, long, default_value_t = 5)]
    interval: u64,

    /// Seconds to wait for a response before a check is declared failed.
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Detection mode: icmp or dns.
    #[arg(short, long, default_value = "icmp")]
    mode: ProbeMode,

    /// Source IP address for the probes.
    #[arg(short, long)]
    source: Option<IpAddr>,

    /// IP address of the DNS nameserver; required with dns mode.
    #[arg(short, long)]
    dns: Option<IpAddr>,

    /// Consecutive checks required before a target switches status.
    #[arg(short = 'D', long, default_value_t = 3)]
    dampening: u32,

    /// Optional TOML file with additional target definitions.
    #[arg(long)]
    config: Option<PathBuf>,

    /// FQDN or IP address of the destination(s) to check.
    hosts: Vec<String>,
}

impl Cli {
    fn target_for(&self, host: String) -> TargetSpec {
        TargetSpec {
            host,
            mode: self.mode,
            source: self.source,
            dns_server: self.dns,
            interval_secs: self.interval,
            timeout_secs: self.timeout,
            dampening: self.dampening,
        }
    }
}

fn init_tracing(cli: &Cli) {
    // Errors and confirmed transitions always show; -v adds the per-check
    // lines and -V adds probe internals. RUST_LOG overrides everything.
    let default_level = if cli.very_verbose {
        "livecheck=debug"
    } else if cli.verbose {
        "livecheck=info"
    } else {
        // Notifications always pass through, whatever the verbosity.
        "livecheck=error,livecheck::notify=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();
}

fn build_config(cli: &Cli) -> Result<MonitorConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => MonitorConfig::default(),
    };

    for host in &cli.hosts {
        config.targets.push(cli.target_for(host.clone()));
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn display_settings(config: &MonitorConfig) {
    tracing::info!("########### Your settings: ###########");
    for target in &config.targets {
        tracing::info!(
            host = %target.host,
            mode = %target.mode,
            source = ?target.source,
            dns_server = ?target.dns_server,
            interval_secs = target.interval_secs,
            timeout_secs = target.timeout_secs,
            dampening = target.dampening,
            "target"
        );
    }
    tracing::info!("######################################");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Everything that can refuse to run does so here, before monitoring
    // begins; past this point nothing is fatal.
    let config = build_config(&cli)?;
    let settings = PingSettings::detect()?;

    display_settings(&config);

    let notifier = Arc::new(LogNotifier::new());
    let shutdown = Shutdown::new();
    let mut tasks = Vec::with_capacity(config.targets.len());

    for spec in config.targets {
        let probe = ProbeKind::for_target(&spec, settings)?;
        let monitor = TargetMonitor::new(spec, probe, notifier.clone());
        tasks.push(tokio::spawn(monitor.run(shutdown.subscribe())));
    }

    shutdown.on_interrupt().await;

    for task in tasks {
        let _ = task.await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
