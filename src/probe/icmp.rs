//! ICMP echo probe via the system ping binary.
//!
//! # Responsibilities
//! - Issue one echo request bounded by the configured timeout
//! - Kill a non-responding subprocess rather than abandoning it
//! - Parse the round-trip latency from the ping summary line
//!
//! # Design Decisions
//! - One echo per check (`-c 1`); the dampening layer, not ping retries,
//!   decides how much evidence a status change needs
//! - `kill_on_drop(true)` plus an outer `tokio::time::timeout` is the hard
//!   wall-clock bound; the poll interval may be shorter than worst-case
//!   ping latency, so hung children must not accumulate
//! - A positive check whose output defies the latency grammar is still
//!   alive, just unmeasured

use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time;

use super::{Measurement, PingSettings, Probe, ProbeError, ProbeOutcome};

/// Subprocess-based ICMP echo probe for one target.
#[derive(Debug)]
pub struct IcmpProbe {
    host: String,
    timeout: Duration,
    source: Option<IpAddr>,
    settings: PingSettings,
}

impl IcmpProbe {
    pub fn new(
        host: impl Into<String>,
        timeout: Duration,
        source: Option<IpAddr>,
        settings: PingSettings,
    ) -> Self {
        Self {
            host: host.into(),
            timeout,
            source,
            settings,
        }
    }

    fn command(&self) -> Command {
        let wait = self.timeout.as_secs() * self.settings.timeout_unit;

        let mut cmd = Command::new("ping");
        cmd.args(["-n", "-c", "1", "-W"]).arg(wait.to_string());
        if let Some(source) = self.source {
            cmd.arg(self.settings.source_flag).arg(source.to_string());
        }
        cmd.arg(&self.host);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the child on timeout kills the ping process.
            .kill_on_drop(true);
        cmd
    }
}

impl Probe for IcmpProbe {
    async fn check(&self) -> Result<ProbeOutcome, ProbeError> {
        let cmd = self.command();
        tracing::debug!(host = %self.host, command = ?cmd.as_std(), "issuing ping");

        let output = match run_bounded(cmd, self.timeout).await? {
            Some(output) => output,
            None => {
                return Ok(ProbeOutcome::down(format!(
                    "ping did not complete within {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            tracing::debug!(host = %self.host, output = %stdout, "ping output");
            let latency = parse_latency(&stdout).map(Measurement::LatencyMs);
            Ok(ProbeOutcome::up(latency))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let first_line = stderr.lines().next().unwrap_or("");
            Ok(ProbeOutcome::down(first_line))
        }
    }
}

/// Run a subprocess under a hard wall-clock bound.
///
/// `Ok(None)` means the bound expired; the child is killed when its handle
/// drops (`kill_on_drop`), never abandoned. `Err` means the process could
/// not be launched at all.
pub(crate) async fn run_bounded(
    mut cmd: Command,
    timeout: Duration,
) -> Result<Option<std::process::Output>, ProbeError> {
    match time::timeout(timeout, cmd.output()).await {
        Ok(result) => Ok(Some(result.map_err(ProbeError::Spawn)?)),
        // The output future is dropped here, killing the child.
        Err(_) => Ok(None),
    }
}

/// Extract the average round-trip time from ping output.
///
/// Grammar: the last non-empty line containing an `=` followed by a
/// `/`-separated `min/avg/max`-style triple, e.g.
/// `rtt min/avg/max/mdev = 6.014/6.105/6.197/0.091 ms` (Linux) or
/// `round-trip min/avg/max/stddev = 5.1/5.4/5.8/0.3 ms` (macOS).
/// The second field is the average. Output that does not match yields
/// `None` rather than a failure.
pub(crate) fn parse_latency(output: &str) -> Option<f64> {
    output
        .lines()
        .rev()
        .filter(|line| !line.trim().is_empty())
        .find_map(parse_summary_line)
}

fn parse_summary_line(line: &str) -> Option<f64> {
    let (_, stats) = line.rsplit_once('=')?;
    let stats = stats.trim().trim_end_matches("ms").trim();
    let mut fields = stats.split('/');
    let _min = fields.next()?;
    let avg = fields.next()?;
    let _max = fields.next()?;
    avg.trim().parse::<f64>().ok()
}
