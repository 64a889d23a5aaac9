use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use inquire::Text;
use tokio::io::BufReader;
use weather_shell_core::{Config, Context, session};

use crate::wiring;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-shell", version, about = "Where am I, and what is the weather?")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read commands from stdin (the default). Type `help` to list them.
    Shell,

    /// Interactively edit the endpoints and user agent.
    Configure,

    /// Print the location of the config file.
    Path,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Shell) {
            Command::Shell => {
                let config = load_config(self.config.as_deref())?;
                let registry = wiring::registry_from_config(&config)?;

                let mut out = std::io::stdout();
                let mut err = std::io::stderr();
                let mut ctx = Context::new(&mut out, &mut err);

                session::run(&registry, BufReader::new(tokio::io::stdin()), &mut ctx)
                    .await
                    .context("Interactive session failed")?;
            }
            Command::Configure => {
                let current = load_config(self.config.as_deref())?;
                let updated = prompt_config(current)?;

                let path = match self.config {
                    Some(path) => {
                        updated.save_to(&path)?;
                        path
                    }
                    None => updated.save()?,
                };
                println!("Configuration saved to {}", path.display());
            }
            Command::Path => {
                let path = match self.config {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                println!("{}", path.display());
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn prompt_config(mut config: Config) -> anyhow::Result<Config> {
    config.user_agent = prompt("User agent:", &config.user_agent)?;
    config.endpoints.ip_lookup = prompt("IP lookup URL:", &config.endpoints.ip_lookup)?;
    config.endpoints.geolocation = prompt("Geolocation URL:", &config.endpoints.geolocation)?;
    config.endpoints.weather_points =
        prompt("Weather points URL:", &config.endpoints.weather_points)?;
    Ok(config)
}

fn prompt(message: &str, current: &str) -> anyhow::Result<String> {
    let answer = Text::new(message)
        .with_default(current)
        .prompt()
        .with_context(|| format!("Failed to read answer for '{message}'"))?;
    Ok(answer.trim().to_string())
}
