//! The **abstraction** over the probe exchange.
//!
//! [`DiscoveryService`](crate::discovery::DiscoveryService) only ever talks to a
//! [`ProbeTransport`]. The real one lives in [`crate::network::transport`];
//! tests hand the service a scripted implementation instead.

use std::net::SocketAddrV4;
use std::time::Duration;

use async_trait::async_trait;
use nvtscout_common::error::TransportError;
use nvtscout_protocols::WS_DISCOVERY_ADDR;
use nvtscout_protocols::probe::ProbeFilter;

/// How long replies are collected after the probe goes out.
pub const PROBE_WINDOW: Duration = Duration::from_secs(1);
/// Keeps the probe inside the local segment plus one router hop.
pub const MULTICAST_TTL: u32 = 2;
pub const RECV_BUFFER_SIZE: usize = 8192;

/// Sends a probe out of one interface and returns every reply body.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Replies come back in arrival order, undeduplicated. Any socket error
    /// fails the whole call; no partial results.
    async fn probe(
        &self,
        interface: &str,
        filter: &ProbeFilter,
    ) -> Result<Vec<String>, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound on the collection window. Silence for the whole window is
    /// an empty result, not an error.
    pub window: Duration,
    pub ttl: u32,
    pub buffer_size: usize,
    /// Where the probe is sent. A unicast address turns the probe into a
    /// directed probe and skips the multicast group setup.
    pub destination: SocketAddrV4,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            window: PROBE_WINDOW,
            ttl: MULTICAST_TTL,
            buffer_size: RECV_BUFFER_SIZE,
            destination: WS_DISCOVERY_ADDR,
        }
    }
}

impl TransportConfig {
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn with_destination(mut self, destination: SocketAddrV4) -> Self {
        self.destination = destination;
        self
    }
}
