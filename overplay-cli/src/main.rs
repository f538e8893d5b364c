//! OverPlay CLI - Command-line interface
//!
//! Replays scripted gesture sessions through the playback controller and
//! manages the tuning file.

mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use overplay::config::config_file_path;
use overplay::log::default_logger;
use overplay::OverplayConfig;

use commands::config::ConfigCommands;
use commands::simulate::SimulateArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "overplay", version, about = "Tilt and shake playback control")]
struct Cli {
    /// Configuration file (defaults to the per-user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a scripted sensor scenario against a simulated player
    Simulate(SimulateArgs),

    /// View or edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli.config.unwrap_or_else(config_file_path);

    match cli.command {
        Command::Simulate(args) => {
            let config = OverplayConfig::load_or_default(&path)?;
            tracing::debug!(path = %path.display(), "Configuration loaded");
            commands::simulate::run(args, config, default_logger())
        }
        Command::Config(command) => commands::config::run(command, &path),
    }
}
