use clap::Parser;
use autofill_detection::cli::commands::{cmd_fill, cmd_inspect, cmd_save};
use autofill_detection::cli::config::{Cli, Commands, init_logging};
use autofill_detection::config::load_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Fill {
            tree,
            origin,
            store,
            trace,
        } => {
            let found = cmd_fill(config, &tree, &origin, store.as_deref(), trace.as_deref())?;
            if !found {
                std::process::exit(1);
            }
        }
        Commands::Save {
            tree,
            origin,
            store,
            trace,
        } => {
            let saved = cmd_save(config, &tree, &origin, store.as_deref(), trace.as_deref())?;
            if !saved {
                std::process::exit(1);
            }
        }
        Commands::Inspect { tree } => {
            cmd_inspect(config, &tree)?;
        }
    }

    Ok(())
}
