use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use async_trait::async_trait;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, error, trace};

use nvtscout_common::error::TransportError;
use nvtscout_common::network::interface::{self, ProbeInterface};
use nvtscout_protocols::WS_DISCOVERY_GROUP;
use nvtscout_protocols::probe::{Probe, ProbeFilter};

use crate::probe::{ProbeTransport, TransportConfig};

/// UDP transport for WS-Discovery probes.
///
/// Every call opens its own socket on the requested interface and closes it
/// before returning.
#[derive(Debug, Clone, Default)]
pub struct MulticastTransport {
    config: TransportConfig,
}

impl MulticastTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProbeTransport for MulticastTransport {
    async fn probe(
        &self,
        interface: &str,
        filter: &ProbeFilter,
    ) -> Result<Vec<String>, TransportError> {
        let result = exchange(interface, filter, &self.config).await;
        if let Err(e) = &result {
            error!(interface, "probe exchange failed: {e}");
        }
        result
    }
}

async fn exchange(
    interface_name: &str,
    filter: &ProbeFilter,
    config: &TransportConfig,
) -> Result<Vec<String>, TransportError> {
    let interface: ProbeInterface = interface::resolve(interface_name)?;
    let socket: UdpSocket = open_socket(&interface, config)?;

    let probe = Probe::new(filter);
    debug!(
        interface = %interface.name,
        source = %interface.ipv4,
        destination = %config.destination,
        message_id = %probe.message_id,
        "sending probe"
    );

    socket
        .send_to(probe.body.as_bytes(), SocketAddr::V4(config.destination))
        .await
        .map_err(TransportError::Send)?;

    collect_replies(&socket, config).await
}

fn open_socket(
    interface: &ProbeInterface,
    config: &TransportConfig,
) -> Result<UdpSocket, TransportError> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .map_err(TransportError::Bind)?;

    let multicast: bool = config.destination.ip().is_multicast();

    if multicast {
        let bind_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0);
        socket.bind(&bind_addr.into()).map_err(TransportError::Bind)?;

        let join_err = |source| TransportError::Join {
            interface: interface.name.clone(),
            source,
        };
        socket
            .join_multicast_v4(&WS_DISCOVERY_GROUP, &interface.ipv4)
            .map_err(join_err)?;
        socket
            .set_multicast_if_v4(&interface.ipv4)
            .map_err(join_err)?;
        socket
            .set_multicast_ttl_v4(config.ttl)
            .map_err(join_err)?;
    } else {
        let bind_addr = SocketAddrV4::new(interface.ipv4, 0);
        socket.bind(&bind_addr.into()).map_err(TransportError::Bind)?;
    }

    socket.set_nonblocking(true).map_err(TransportError::Bind)?;
    UdpSocket::from_std(socket.into()).map_err(TransportError::Bind)
}

async fn collect_replies(
    socket: &UdpSocket,
    config: &TransportConfig,
) -> Result<Vec<String>, TransportError> {
    let deadline: Instant = Instant::now() + config.window;
    let mut buf: Vec<u8> = vec![0u8; config.buffer_size];
    let mut replies: Vec<String> = Vec::new();

    loop {
        match timeout_at(deadline, socket.recv_from(&mut buf)).await {
            Ok(Ok((len, from))) => {
                trace!(%from, len, "probe match received");
                replies.push(String::from_utf8_lossy(&buf[..len]).into_owned());
            }
            Ok(Err(e)) => return Err(TransportError::Receive(e)),
            Err(_elapsed) => break,
        }
    }

    debug!(replies = replies.len(), "collection window closed");
    Ok(replies)
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
    use nvtscout_common::error::InterfaceError;
    use std::time::Duration;

    fn loopback_name() -> Option<String> {
        interface::list_interfaces()
            .into_iter()
            .find(|i| i.is_loopback() && i.is_up())
            .map(|i| i.name)
    }

    #[tokio::test]
    async fn probe_fails_on_unknown_interface() {
        let transport = MulticastTransport::default();
        let result = transport
            .probe("nvtscout-missing0", &ProbeFilter::network_video_transmitter())
            .await;

        match result {
            Err(TransportError::Interface(InterfaceError::NotFound(name))) => {
                assert_eq!(name, "nvtscout-missing0")
            }
            other => panic!("expected interface error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn directed_probe_collects_replies_in_arrival_order() {
        let Some(lo) = loopback_name() else {
            eprintln!("Skipping: no loopback interface");
            return;
        };

        let device = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let device_addr = match device.local_addr().unwrap() {
            SocketAddr::V4(v4) => v4,
            SocketAddr::V6(_) => unreachable!(),
        };

        let responder = tokio::spawn(async move {
            let mut buf = vec![0u8; 8192];
            let (len, from) = device.recv_from(&mut buf).await.unwrap();
            let probe = String::from_utf8_lossy(&buf[..len]).into_owned();
            device.send_to(b"first", from).await.unwrap();
            device.send_to(b"second", from).await.unwrap();
            probe
        });

        let config = TransportConfig::default()
            .with_window(Duration::from_millis(300))
            .with_destination(device_addr);
        let replies = MulticastTransport::new(config)
            .probe(&lo, &ProbeFilter::network_video_transmitter())
            .await
            .unwrap();

        assert_eq!(replies, vec!["first".to_string(), "second".to_string()]);
        let probe = responder.await.unwrap();
        assert!(probe.contains("dn:NetworkVideoTransmitter"));
    }

    #[tokio::test]
    async fn silence_yields_empty_result() {
        let Some(lo) = loopback_name() else {
            eprintln!("Skipping: no loopback interface");
            return;
        };

        // Bound but never answers.
        let device = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let device_addr = match device.local_addr().unwrap() {
            SocketAddr::V4(v4) => v4,
            SocketAddr::V6(_) => unreachable!(),
        };

        let config = TransportConfig::default()
            .with_window(Duration::from_millis(100))
            .with_destination(device_addr);
        let replies = MulticastTransport::new(config)
            .probe(&lo, &ProbeFilter::network_video_transmitter())
            .await
            .unwrap();

        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn multicast_on_quiet_loopback_yields_empty_result() {
        let Some(lo) = loopback_name() else {
            eprintln!("Skipping: no loopback interface");
            return;
        };

        let config = TransportConfig::default().with_window(Duration::from_millis(200));
        assert!(config.destination.ip().is_multicast());

        let replies = MulticastTransport::new(config)
            .probe(&lo, &ProbeFilter::network_video_transmitter())
            .await;

        assert_eq!(replies.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    #[ignore]
    async fn multicast_probe_on_default_interface() {
        let iface = interface::default_interface().expect("no usable interface");
        let replies = MulticastTransport::default()
            .probe(&iface.name, &ProbeFilter::network_video_transmitter())
            .await
            .unwrap();
        println!("{} replies on {}", replies.len(), iface.name);
    }
}
