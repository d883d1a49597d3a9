//! DNS resolution probe.
//!
//! # Responsibilities
//! - Issue one A-record query against the configured nameserver
//! - Normalize no-answer, NXDOMAIN, and timeout to a negative outcome
//!
//! # Design Decisions
//! - Resolution failures are liveness signals, never probe errors; the
//!   resolver's whole error taxonomy collapses to `alive = false` with the
//!   error text as diagnostic
//! - Multiple answer records are informational only; the first one wins

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::Resolver;

use super::{Measurement, Probe, ProbeError, ProbeOutcome};

const DNS_PORT: u16 = 53;

/// A-record resolvability probe for one target name.
pub struct DnsProbe {
    host: String,
    resolver: Resolver<TokioConnectionProvider>,
}

impl std::fmt::Debug for DnsProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsProbe").field("host", &self.host).finish()
    }
}

impl DnsProbe {
    /// Build a probe querying `nameserver` over UDP, with both the query
    /// timeout and lifetime bounded by `timeout` (single attempt).
    pub fn new(
        host: impl Into<String>,
        nameserver: IpAddr,
        source: Option<IpAddr>,
        timeout: Duration,
    ) -> Self {
        let mut name_server =
            NameServerConfig::new(SocketAddr::new(nameserver, DNS_PORT), Protocol::Udp);
        if let Some(source) = source {
            name_server.bind_addr = Some(SocketAddr::new(source, 0));
        }

        let config = ResolverConfig::from_parts(None, vec![], vec![name_server]);
        let mut builder =
            Resolver::builder_with_config(config, TokioConnectionProvider::default());
        builder.options_mut().timeout = timeout;
        builder.options_mut().attempts = 1;

        Self {
            host: host.into(),
            resolver: builder.build(),
        }
    }
}

impl Probe for DnsProbe {
    async fn check(&self) -> Result<ProbeOutcome, ProbeError> {
        tracing::debug!(host = %self.host, "DNS query attempt");

        match self.resolver.ipv4_lookup(self.host.as_str()).await {
            Ok(lookup) => {
                let addresses: Vec<IpAddr> =
                    lookup.iter().map(|record| IpAddr::V4(record.0)).collect();
                for address in &addresses {
                    tracing::debug!(host = %self.host, %address, "resolved address");
                }
                Ok(outcome_from_records(&addresses))
            }
            // No answer, NXDOMAIN, and query timeout all land here; they are
            // liveness signals, not probe-tooling failures.
            Err(e) => Ok(ProbeOutcome::down(e.to_string())),
        }
    }
}

/// Positive iff at least one record came back; the first record is the
/// measurement, deterministically, regardless of how many exist.
fn outcome_from_records(addresses: &[IpAddr]) -> ProbeOutcome {
    match addresses.first() {
        Some(first) => ProbeOutcome::up(Some(Measurement::ResolvedAddr(*first))),
        None => ProbeOutcome::down("no address records in DNS answer"),
    }
}
