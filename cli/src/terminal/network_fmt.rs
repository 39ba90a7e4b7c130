use colored::*;
use nvtscout_common::network::host::HostRecord;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;
use std::net::Ipv6Addr;

use crate::terminal::{colors, print};

fn ipv6_type(ipv6_addr: &Ipv6Addr) -> &'static str {
    let first_byte = ipv6_addr.octets()[0];
    if (0x20..=0x3F).contains(&first_byte) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

pub fn to_key_value_pair_net(ip_net: &[IpNetwork]) -> Vec<(String, ColoredString)> {
    ip_net
        .iter()
        .map(|ip_network| match ip_network {
            IpNetwork::V4(ipv4_network) => {
                let address: ColoredString = ipv4_network.ip().to_string().color(colors::IPV4_ADDR);
                let prefix: ColoredString =
                    ipv4_network.prefix().to_string().color(colors::IPV4_PREFIX);
                let result: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                ("IPv4".to_string(), result)
            }
            IpNetwork::V6(ipv6_network) => {
                let address: ColoredString = ipv6_network.ip().to_string().color(colors::IPV6_ADDR);
                let prefix: ColoredString =
                    ipv6_network.prefix().to_string().color(colors::IPV6_PREFIX);
                let value: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                (ipv6_type(&ipv6_network.ip()).to_string(), value)
            }
        })
        .collect()
}

pub fn print_interface(interface: &NetworkInterface, idx: usize, is_default: bool) {
    let title: String = if is_default {
        format!("{} (default)", interface.name)
    } else {
        interface.name.clone()
    };
    print::tree_head(idx, &title);

    let mut key_value_pair: Vec<(String, ColoredString)> = to_key_value_pair_net(&interface.ips);
    if let Some(mac_addr) = interface.mac {
        key_value_pair.push((
            "MAC".to_string(),
            mac_addr.to_string().color(colors::MAC_ADDR),
        ));
    }
    let state: ColoredString = if interface.is_up() { "up".green() } else { "down".red() };
    key_value_pair.push(("State".to_string(), state));
    print::as_tree_one_level(key_value_pair);
}

/// One device as a tree, numbered from 1 like the discovery table.
pub fn print_host(host: &HostRecord, idx: usize) {
    let name: &str = if host.name().is_empty() { "No name" } else { host.name() };
    print::tree_head(idx, name);

    let port: ColoredString = match host.port() {
        0 => "unknown".dimmed(),
        port => port.to_string().color(colors::PORT),
    };
    let details: Vec<(String, ColoredString)> = vec![
        ("IP".to_string(), host.ip().color(colors::IPV4_ADDR)),
        ("Port".to_string(), port),
        ("URL".to_string(), host.reachable_address().color(colors::TEXT_DEFAULT)),
    ];
    print::as_tree_one_level(details);
}
