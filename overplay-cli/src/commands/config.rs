//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` for
//! viewing and editing the tuning file from the command line.

use std::path::Path;

use clap::Subcommand;
use overplay::config::ConfigKey;
use overplay::OverplayConfig;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., gesture.seek_threshold)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., gesture.seek_threshold)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the file at `path`.
pub fn run(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key, path),
        ConfigCommands::Set { key, value } => run_set(&key, &value, path),
        ConfigCommands::List => run_list(path),
        ConfigCommands::Path => run_path(path),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'overplay config list' to see available keys.",
            key
        ))
    })
}

fn run_get(key: &str, path: &Path) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = OverplayConfig::load_or_default(path)?;
    println!("{}", config_key.get(&config));
    Ok(())
}

fn run_set(key: &str, value: &str, path: &Path) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = OverplayConfig::load_or_default(path)?;
    config_key.set(&mut config, value)?;
    config.validate()?;
    config.save(path)?;

    tracing::debug!(path = %path.display(), key = config_key.name(), "Configuration saved");
    println!("Set {} = {}", config_key.name(), config_key.get(&config));
    Ok(())
}

fn run_list(path: &Path) -> Result<(), CliError> {
    let config = OverplayConfig::load_or_default(path)?;

    println!("Configuration Settings");
    println!("======================");
    println!();

    let mut current_section = "";
    for key in ConfigKey::all() {
        let section = key.section();
        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("[{}]", section);
            current_section = section;
        }
        println!("  {} = {}", key.key_name(), key.get(&config));
    }

    Ok(())
}

fn run_path(path: &Path) -> Result<(), CliError> {
    println!("{}", path.display());
    Ok(())
}
