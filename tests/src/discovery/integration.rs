#![cfg(test)]
use std::time::Duration;

use nvtscout_common::network::host::HostRecord;
use nvtscout_core::network::MulticastTransport;
use nvtscout_core::{DiscoveryService, TransportConfig, run_discovery};

use crate::utils::{fake_device, loopback_name, probe_match};

fn directed_service(device: std::net::SocketAddrV4, window: Duration) -> DiscoveryService {
    let config = TransportConfig::default()
        .with_window(window)
        .with_destination(device);
    DiscoveryService::new(Box::new(MulticastTransport::new(config)))
}

/// A directed probe against a local stand-in camera exercises the whole
/// pipeline: probe rendering, socket exchange, parsing and aggregation.
#[tokio::test]
async fn discovery_against_fake_camera() {
    let Some(lo) = loopback_name() else {
        eprintln!("Skipping: no loopback interface");
        return;
    };

    let replies = vec![
        "<not-xml".to_string(),
        probe_match(
            "http://192.168.1.50:8080/onvif/device_service http://[fe80::2]:8080/onvif/device_service",
            "onvif://www.onvif.org/type/video_encoder onvif://www.onvif.org/name/Camera-01",
        ),
    ];
    let (device, probe) = fake_device(replies).await;

    let hosts: Vec<HostRecord> = directed_service(device, Duration::from_millis(300))
        .run_discovery(&lo)
        .await
        .expect("discovery against loopback failed");

    assert_eq!(hosts.len(), 1, "malformed reply should be dropped: {hosts:?}");
    assert_eq!(
        serde_json::to_value(&hosts[0]).unwrap(),
        serde_json::json!({
            "url": "192.168.1.50:8080",
            "name": "Camera-01",
            "ip": "192.168.1.50",
            "port": 8080,
        })
    );

    let probe = probe.await.unwrap();
    assert!(probe.contains("dn:NetworkVideoTransmitter"));
    assert!(probe.contains(r#"xmlns:dn="http://www.onvif.org/ver10/network/wsdl""#));
    assert!(probe.contains("<a:MessageID>uuid:"));
}

#[tokio::test]
async fn silent_network_returns_empty_list() {
    let Some(lo) = loopback_name() else {
        eprintln!("Skipping: no loopback interface");
        return;
    };

    let (device, _probe) = fake_device(vec![]).await;
    let hosts = directed_service(device, Duration::from_millis(150))
        .run_discovery(&lo)
        .await
        .unwrap();

    assert!(hosts.is_empty());
}

#[tokio::test]
async fn multicast_discovery_on_loopback_finds_nothing() {
    let Some(lo) = loopback_name() else {
        eprintln!("Skipping: no loopback interface");
        return;
    };

    let hosts = run_discovery(&lo).await.unwrap();

    assert!(hosts.is_empty());
}

#[tokio::test]
async fn unknown_interface_is_an_error() {
    let result = run_discovery("nvtscout-missing0").await;

    let err = result.expect_err("discovery on a missing interface must fail");
    assert!(err.is_interface_error(), "unexpected error kind: {err}");
}

/// Sends a real multicast probe. Needs a LAN with multicast routing; run
/// with `--ignored` on a machine next to an ONVIF camera.
#[tokio::test]
#[ignore]
async fn multicast_discovery_on_default_interface() {
    let iface = nvtscout_common::network::interface::default_interface()
        .expect("no usable interface");

    let hosts = run_discovery(&iface.name).await.unwrap();
    for host in &hosts {
        println!("{host}");
    }
}
