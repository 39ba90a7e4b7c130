//! # Device Discovery Service
//!
//! Implements the "find video transmitters on this interface" use case.
//!
//! The service owns no sockets itself. It delegates the probe exchange to a
//! [`ProbeTransport`] and maps each reply through the probe-match parser.

use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use nvtscout_common::error::DiscoveryError;
use nvtscout_common::network::host::HostRecord;
use nvtscout_protocols::probe::ProbeFilter;
use nvtscout_protocols::probe_match;

use crate::network::MulticastTransport;
use crate::probe::{ProbeTransport, TransportConfig};

/// Orchestrates one discovery run:
/// 1. the transport sends the probe and collects raw replies.
/// 2. every reply is parsed; unreadable ones are logged and dropped.
pub struct DiscoveryService {
    transport: Box<dyn ProbeTransport>,
    filter: ProbeFilter,
}

impl Default for DiscoveryService {
    fn default() -> Self {
        Self::new(Box::new(MulticastTransport::new(TransportConfig::default())))
    }
}

impl DiscoveryService {
    /// Probes for `dn:NetworkVideoTransmitter` through `transport`.
    pub fn new(transport: Box<dyn ProbeTransport>) -> Self {
        Self {
            transport,
            filter: ProbeFilter::network_video_transmitter(),
        }
    }

    pub fn with_filter(mut self, filter: ProbeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Runs a discovery on `interface` and returns the devices in reply order.
    ///
    /// Either the whole run fails (interface or socket trouble) or a list,
    /// possibly empty, comes back.
    pub async fn run_discovery(&self, interface: &str) -> Result<Vec<HostRecord>, DiscoveryError> {
        let span = info_span!("discovery", interface);
        self.discover(interface).instrument(span).await
    }

    async fn discover(&self, interface: &str) -> Result<Vec<HostRecord>, DiscoveryError> {
        let start_time: Instant = Instant::now();
        info!("Starting device discovery");

        let replies: Vec<String> = self
            .transport
            .probe(interface, &self.filter)
            .await
            .map_err(|e| DiscoveryError::probe(interface, e))?;

        let hosts: Vec<HostRecord> = parse_replies(&replies);

        let elapsed = start_time.elapsed();
        info!(
            count = hosts.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Discovery complete: {} device(s) in {:.2}s",
            hosts.len(),
            elapsed.as_secs_f64()
        );
        Ok(hosts)
    }
}

/// Runs a discovery with the default multicast transport.
pub async fn run_discovery(interface: &str) -> Result<Vec<HostRecord>, DiscoveryError> {
    DiscoveryService::default().run_discovery(interface).await
}

fn parse_replies(replies: &[String]) -> Vec<HostRecord> {
    replies
        .iter()
        .enumerate()
        .filter_map(|(idx, body)| match probe_match::parse(body) {
            Ok(host) => Some(host),
            Err(e) => {
                warn!(reply = idx, "Dropping reply: {e}");
                None
            }
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
