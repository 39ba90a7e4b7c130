//! # Host Record
//!
//! The one value a discovery run hands back to its caller: where a video
//! transmitter can be reached and what it calls itself.

use std::fmt;

use serde::Serialize;

/// The `host:port` authority a device advertised, split into its parts.
///
/// `ip` and `port` always come from `address`, never from two different
/// advertised endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    address: String,
    ip: String,
    port: u16,
}

impl Endpoint {
    pub fn new(address: impl Into<String>, ip: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            ip: ip.into(),
            port,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

/// A device found by a probe.
///
/// Built once from a single probe match and never changed afterwards. The
/// serialized shape is `{ "url", "name", "ip", "port" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct HostRecord {
    #[serde(rename = "url")]
    reachable_address: String,
    name: String,
    ip: String,
    port: u16,
}

impl HostRecord {
    pub fn new(endpoint: Endpoint, name: impl Into<String>) -> Self {
        let Endpoint { address, ip, port } = endpoint;
        Self {
            reachable_address: address,
            name: name.into(),
            ip,
            port,
        }
    }

    /// The `host:port` token, e.g. `192.168.1.50:80`.
    pub fn reachable_address(&self) -> &str {
        &self.reachable_address
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// `0` when the device advertised no usable port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Empty when the device exposes no name scope.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "unnamed" } else { &self.name };
        write!(f, "{} ({})", name, self.reachable_address)
    }
}
