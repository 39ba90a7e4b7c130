//! WS-Discovery message handling for network video transmitters.
//!
//! Both halves are pure: [`probe`] renders the multicast `Probe` envelope and
//! [`probe_match`] turns a `ProbeMatches` reply into a
//! [`HostRecord`](nvtscout_common::network::host::HostRecord). Sockets live in
//! `nvtscout-core`.

use std::net::{Ipv4Addr, SocketAddrV4};

pub mod probe;
pub mod probe_match;

/// IPv4 multicast group reserved for WS-Discovery.
pub const WS_DISCOVERY_GROUP: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
pub const WS_DISCOVERY_PORT: u16 = 3702;

pub const WS_DISCOVERY_ADDR: SocketAddrV4 = SocketAddrV4::new(WS_DISCOVERY_GROUP, WS_DISCOVERY_PORT);
