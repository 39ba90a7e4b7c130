use nvtscout_common::config::Config;
use nvtscout_common::network::interface;
use pnet::datalink::NetworkInterface;

use crate::terminal::{network_fmt, print};

pub fn interfaces(cfg: &Config) -> anyhow::Result<()> {
    let interfaces: Vec<NetworkInterface> = interface::list_interfaces();
    let default_name: Option<String> = interface::default_interface().map(|i| i.name);

    if cfg.json {
        let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if interfaces.is_empty() {
        print::print_status("The operating system reported no network interfaces");
        return Ok(());
    }

    for (idx, intf) in interfaces.iter().enumerate() {
        let is_default: bool = default_name.as_deref() == Some(intf.name.as_str());
        network_fmt::print_interface(intf, idx + 1, is_default);
        if idx + 1 != interfaces.len() {
            print::print("");
        }
    }
    Ok(())
}
