mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, interfaces};
use nvtscout_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = Config {
        json: commands.json,
        no_banner: commands.no_banner || commands.json,
    };
    print::banner(&cfg);

    let result = match commands.command {
        Commands::Interfaces => {
            print::header("network interfaces", &cfg);
            interfaces::interfaces(&cfg)
        }
        Commands::Discover { interface } => {
            print::header("getting ready for discovery", &cfg);
            discover::discover(interface, &cfg).await
        }
    };

    print::end_of_program(&cfg);
    result
}
