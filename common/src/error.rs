//! Error types shared by the transport, the parser and the orchestrator.
//!
//! Fatal kinds ([`InterfaceError`], [`TransportError`]) abort a discovery call.
//! [`ParseError`] is scoped to a single probe match and never aborts the batch.

use std::io;

use thiserror::Error;

/// The named interface cannot be used to send a probe.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("no network interface named `{0}`")]
    NotFound(String),

    #[error("network interface `{0}` is down")]
    Down(String),

    #[error("network interface `{0}` has no IPv4 address")]
    NoIpv4(String),
}

/// Socket level failure while exchanging the probe.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Interface(#[from] InterfaceError),

    #[error("failed to open probe socket: {0}")]
    Bind(#[source] io::Error),

    #[error("failed to join multicast group on `{interface}`: {source}")]
    Join {
        interface: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to send probe: {0}")]
    Send(#[source] io::Error),

    #[error("failed to receive probe match: {0}")]
    Receive(#[source] io::Error),
}

impl TransportError {
    pub fn is_interface_error(&self) -> bool {
        matches!(self, TransportError::Interface(_))
    }
}

/// Error returned to callers of a discovery run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("discovery on `{interface}` failed during probe exchange: {source}")]
    Probe {
        interface: String,
        #[source]
        source: TransportError,
    },
}

impl DiscoveryError {
    pub fn probe(interface: &str, source: TransportError) -> Self {
        DiscoveryError::Probe {
            interface: interface.to_string(),
            source,
        }
    }

    /// True when the interface could not be resolved, as opposed to a socket failure.
    pub fn is_interface_error(&self) -> bool {
        match self {
            DiscoveryError::Probe { source, .. } => source.is_interface_error(),
        }
    }
}

/// Per-item problems found while reading one probe match.
///
/// Only [`ParseError::Malformed`] drops the response. The other two are
/// reported and the record keeps its default field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed probe match: {0}")]
    Malformed(String),

    #[error("endpoint `{0}` has no numeric port")]
    InvalidPort(String),

    #[error("probe match carries no name scope")]
    NoNameScope,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_error_keeps_interface_name_and_cause() {
        let err = DiscoveryError::probe(
            "eth9",
            TransportError::Interface(InterfaceError::NotFound("eth9".to_string())),
        );
        let msg = err.to_string();
        assert!(msg.contains("`eth9`"), "unexpected message: {msg}");
        assert!(msg.contains("no network interface named"), "unexpected message: {msg}");
        assert!(err.is_interface_error());
    }

    #[test]
    fn socket_failures_are_not_interface_errors() {
        let io_err = io::Error::new(io::ErrorKind::AddrInUse, "busy");
        let err = DiscoveryError::probe("eth0", TransportError::Bind(io_err));
        assert!(!err.is_interface_error());
        assert!(err.to_string().contains("failed to open probe socket"));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::InvalidPort("192.168.1.50:http".to_string());
        assert_eq!(err.to_string(), "endpoint `192.168.1.50:http` has no numeric port");
    }
}
