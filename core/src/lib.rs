//! Discovery core: sends the WS-Discovery probe and turns the replies into
//! [`HostRecord`](nvtscout_common::network::host::HostRecord)s.

pub mod discovery;
pub mod network;
pub mod probe;

pub use discovery::{DiscoveryService, run_discovery};
pub use probe::{ProbeTransport, TransportConfig};
