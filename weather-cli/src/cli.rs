use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomUserError, InquireError, Text, validator::Validation};
use std::path::PathBuf;
use weather_now_core::{
    CityName, Config, FetchState, Units, WeatherLookup, provider_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-now", version, about = "Current weather for a city, with emoji")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Lisbon" or "New York, US".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// metric, imperial or standard; defaults to the configured units.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,

        /// Print the weather record as JSON.
        #[arg(long, conflicts_with = "live")]
        json: bool,

        /// Keep a live clock ticking under the report until Ctrl-C.
        #[arg(long)]
        live: bool,
    },

    /// Prompt for city names until Esc or Ctrl-C.
    Ask {
        /// metric, imperial or standard; defaults to the configured units.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,
    },

    /// Show only the live clock.
    Clock {
        /// Stop after this many updates instead of waiting for Ctrl-C.
        #[arg(long)]
        ticks: Option<u32>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, units, json, live } => {
                let config = load_config(self.config.as_deref())?;
                let city = CityName::parse(&city.join(" "))?;
                let mut lookup = build_lookup(&config, units)?;

                output::print_loading();
                let state = lookup.submit(city).await;
                if let FetchState::Failed { message, .. } = state {
                    bail!("{message}");
                }
                let record = state.record().cloned().context("Weather lookup did not complete")?;

                if json {
                    output::print_json(&record)?;
                } else if live {
                    output::print_live(&record).await?;
                } else {
                    output::print_report(&record);
                }
            }
            Command::Ask { units } => {
                let config = load_config(self.config.as_deref())?;
                let mut lookup = build_lookup(&config, units)?;

                output::print_title();

                if let Some(city) = config.default_city().and_then(|c| CityName::parse(c).ok()) {
                    submit_and_print(&mut lookup, city).await;
                }

                while let Some(city) = prompt_city().await? {
                    submit_and_print(&mut lookup, city).await;
                }
            }
            Command::Clock { ticks } => {
                output::run_clock(ticks).await?;
            }
        }

        Ok(())
    }
}

fn parse_units(value: &str) -> Result<Units, String> {
    Units::try_from(value).map_err(|e| e.to_string())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env(|name| std::env::var(name).ok());

    tracing::debug!(
        path = ?path,
        units = %config.units,
        has_api_key = config.api_key().is_some(),
        "configuration loaded"
    );
    Ok(config)
}

fn build_lookup(config: &Config, units: Option<Units>) -> anyhow::Result<WeatherLookup> {
    let provider = provider_from_config(config)?;
    Ok(WeatherLookup::new(provider, units.unwrap_or(config.units)))
}

async fn submit_and_print(lookup: &mut WeatherLookup, city: CityName) {
    output::print_loading();
    match lookup.submit(city).await {
        FetchState::Ready(record) => output::print_report(record),
        FetchState::Failed { message, .. } => output::print_error(message),
        FetchState::Idle | FetchState::Loading { .. } => {}
    }
    println!();
}

/// `None` once the user cancels the prompt.
async fn prompt_city() -> anyhow::Result<Option<CityName>> {
    let answer = tokio::task::spawn_blocking(|| {
        Text::new("Enter city name")
            .with_validator(|input: &str| {
                Ok::<_, CustomUserError>(match CityName::parse(input) {
                    Ok(_) => Validation::Valid,
                    Err(err) => Validation::Invalid(err.to_string().into()),
                })
            })
            .prompt()
    })
    .await
    .context("City prompt task failed")?;

    match answer {
        Ok(input) => Ok(Some(CityName::parse(&input)?)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read city name"),
    }
}
