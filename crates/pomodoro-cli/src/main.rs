use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pomodoro_core::storage::data_dir;
use pomodoro_core::Config;

mod commands;
mod display;
mod host;
mod logging;
mod notify;
mod prompt;
mod shell;

#[derive(Parser)]
#[command(name = "cli-pomodoro", version, about = "Terminal Pomodoro study timer")]
struct Cli {
    /// Directory holding config.toml and the profile document
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Never send desktop notifications
    #[arg(long, global = true)]
    no_notify: bool,
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Study statistics from the saved profile
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dir = data_dir(cli.data_dir.as_deref())?;

    match cli.command {
        Some(Commands::Config { action }) => {
            // A broken config.toml must still be fixable from here.
            logging::init(cli.verbose, "warn");
            commands::config::run(&dir, action)
        }
        command => {
            let config = Config::load_from(&dir)?;
            logging::init(cli.verbose, &config.log.filter);
            match command {
                Some(Commands::Stats { json }) => commands::stats::run(&dir, &config, json),
                _ => shell::run(&dir, &config, cli.no_notify),
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
