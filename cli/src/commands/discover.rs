use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;

use nvtscout_common::config::Config;
use nvtscout_common::network::host::HostRecord;
use nvtscout_common::network::interface as netif;
use nvtscout_core::run_discovery;

use crate::terminal::{colors, network_fmt, print, spinner};

pub async fn discover(interface: Option<String>, cfg: &Config) -> anyhow::Result<()> {
    let interface: String = match interface {
        Some(name) => name,
        None => netif::default_interface()
            .map(|i| i.name)
            .context("No usable network interface found, pass one with --interface")?,
    };
    print::print_status(format!("Probing {}", interface.as_str().color(colors::PRIMARY)));

    spinner::start(format!("Waiting for replies on {interface}..."));
    let start_time: Instant = Instant::now();
    let result = run_discovery(&interface).await;
    spinner::stop();

    let hosts: Vec<HostRecord> =
        result.with_context(|| format!("Device discovery on {interface} failed"))?;

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&hosts)?);
        return Ok(());
    }

    discovery_ends(&hosts, start_time.elapsed(), cfg);
    Ok(())
}

fn discovery_ends(hosts: &[HostRecord], total_time: Duration, cfg: &Config) {
    if hosts.is_empty() {
        print::no_results(cfg);
        return;
    }

    print::header("Network Video Transmitters", cfg);
    for (idx, host) in hosts.iter().enumerate() {
        network_fmt::print_host(host, idx + 1);
        if idx + 1 != hosts.len() {
            print::print("");
        }
    }
    print_summary(hosts.len(), total_time);
}

fn print_summary(hosts_len: usize, total_time: Duration) {
    let devices: ColoredString = format!("{hosts_len} devices").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Discovery Complete: {devices} found in {total_time}").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
}
