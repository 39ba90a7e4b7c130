use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

use crate::error::InterfaceError;

/// The parts of a local interface the probe socket needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeInterface {
    pub name: String,
    /// Source address for the multicast membership and outgoing probe.
    pub ipv4: Ipv4Addr,
}

/// Looks up `name` among the host's interfaces and checks it can carry a probe.
pub fn resolve(name: &str) -> Result<ProbeInterface, InterfaceError> {
    select_by_name(datalink::interfaces(), name)
}

/// Every interface the operating system reports, loopback included.
pub fn list_interfaces() -> Vec<NetworkInterface> {
    datalink::interfaces()
}

/// Picks the interface a discovery should use when the caller named none.
///
/// Wired names (`e*`) go first, then anything else that is up, not loopback
/// and has an IPv4 address.
pub fn default_interface() -> Option<NetworkInterface> {
    select_default(datalink::interfaces())
}

fn select_by_name(
    interfaces: Vec<NetworkInterface>,
    name: &str,
) -> Result<ProbeInterface, InterfaceError> {
    let interface: NetworkInterface = interfaces
        .into_iter()
        .find(|i| i.name == name)
        .ok_or_else(|| InterfaceError::NotFound(name.to_string()))?;

    if !interface.is_up() {
        return Err(InterfaceError::Down(interface.name));
    }

    let ipv4: Ipv4Addr =
        first_ipv4(&interface).ok_or_else(|| InterfaceError::NoIpv4(interface.name.clone()))?;

    Ok(ProbeInterface {
        name: interface.name,
        ipv4,
    })
}

fn select_default(interfaces: Vec<NetworkInterface>) -> Option<NetworkInterface> {
    let mut candidates: Vec<NetworkInterface> = interfaces
        .into_iter()
        .filter(|i| i.is_up() && !i.is_loopback() && first_ipv4(i).is_some())
        .collect();

    candidates.sort_by_key(|i| if i.name.starts_with('e') { 0 } else { 1 });
    candidates.into_iter().next()
}

fn first_ipv4(interface: &NetworkInterface) -> Option<Ipv4Addr> {
    interface.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) => Some(v4.ip()),
        IpNetwork::V6(_) => None,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
