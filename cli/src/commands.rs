pub mod discover;
pub mod interfaces;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nvtscout")]
#[command(about = "Finds ONVIF network video transmitters on the local segment.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Hide the banner and section headers
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the network interfaces a probe can be sent from
    #[command(alias = "i")]
    Interfaces,
    /// Probe one interface for network video transmitters
    #[command(alias = "d")]
    Discover {
        /// Interface to probe. Defaults to the first usable wired interface.
        #[arg(short, long)]
        interface: Option<String>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
