use std::net::{SocketAddr, SocketAddrV4};

use nvtscout_common::network::interface;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// Name of the host's loopback interface, if it has one that is up.
pub fn loopback_name() -> Option<String> {
    interface::list_interfaces()
        .into_iter()
        .find(|i| i.is_loopback() && i.is_up())
        .map(|i| i.name)
}

/// A camera stand-in on 127.0.0.1 that waits for one probe and answers it
/// with `replies`. The handle yields the probe it received.
pub async fn fake_device(replies: Vec<String>) -> (SocketAddrV4, JoinHandle<String>) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = match socket.local_addr().unwrap() {
        SocketAddr::V4(v4) => v4,
        SocketAddr::V6(v6) => panic!("bound to IPv6 {v6}"),
    };

    let handle = tokio::spawn(async move {
        let mut buf = vec![0u8; 8192];
        let (len, from) = socket.recv_from(&mut buf).await.unwrap();
        for reply in &replies {
            socket.send_to(reply.as_bytes(), from).await.unwrap();
        }
        String::from_utf8_lossy(&buf[..len]).into_owned()
    });

    (addr, handle)
}

pub fn probe_match(xaddrs: &str, scopes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope"
    xmlns:wsa="http://schemas.xmlsoap.org/ws/2004/08/addressing"
    xmlns:wsdd="http://schemas.xmlsoap.org/ws/2005/04/discovery"
    xmlns:dn="http://www.onvif.org/ver10/network/wsdl">
  <env:Header>
    <wsa:Action>http://schemas.xmlsoap.org/ws/2005/04/discovery/ProbeMatches</wsa:Action>
  </env:Header>
  <env:Body>
    <wsdd:ProbeMatches>
      <wsdd:ProbeMatch>
        <wsa:EndpointReference><wsa:Address>urn:uuid:2419d68a-2dd2-21b2-a205-ec3dbaa1e29b</wsa:Address></wsa:EndpointReference>
        <wsdd:Types>dn:NetworkVideoTransmitter</wsdd:Types>
        <wsdd:Scopes>{scopes}</wsdd:Scopes>
        <wsdd:XAddrs>{xaddrs}</wsdd:XAddrs>
        <wsdd:MetadataVersion>10</wsdd:MetadataVersion>
      </wsdd:ProbeMatch>
    </wsdd:ProbeMatches>
  </env:Body>
</env:Envelope>"#
    )
}
