use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use std::{fmt, sync::Arc};
use weather_core::{
    CitySearch, CityCandidate, Config, Coordinates, FileStore, FixedLocationSource,
    LocationSource, NoLocationSource, Session, provider_from_config,
};

use crate::output::{candidate_label, render_recent, render_snapshot};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key (and optionally an alternative endpoint).
    Configure {
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show current weather for the selected city, or the device location.
    Show,

    /// Search cities by name, pick one and show its weather.
    Search {
        /// City name or prefix.
        query: String,

        /// Take the first match instead of prompting.
        #[arg(long)]
        first: bool,
    },

    /// Use the device location from now on and show its weather.
    Locate {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// List recent searches.
    Recent {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },

    /// Select a recent search by name and show its weather.
    Recall {
        name: String,
    },
}

struct CityOption(CityCandidate);

impl fmt::Display for CityOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&candidate_label(&self.0))
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure { base_url } => configure(config, base_url),
            Command::Show => {
                let mut session = open_session(&config)?;
                show(&mut session).await
            }
            Command::Search { query, first } => {
                let mut session = open_session(&config)?;
                let search = CitySearch::new(session.provider(), query, config.search_debounce());
                let mut cities = search.results().await?;

                if cities.is_empty() {
                    println!("No cities found for \"{}\".", search.debounced_query());
                    return Ok(());
                }

                let city = if first || cities.len() == 1 {
                    cities.swap_remove(0)
                } else {
                    let options = cities.into_iter().map(CityOption).collect();
                    Select::new("Which city?", options).prompt()?.0
                };

                session.select_city(city)?;
                show(&mut session).await
            }
            Command::Locate { lat, lon } => {
                let mut session = open_session(&config)?;
                let fixed = lat
                    .zip(lon)
                    .map(|(lat, lon)| Coordinates::new(lat, lon))
                    .or(config.location);
                let source: Box<dyn LocationSource> = match fixed {
                    Some(coords) => Box::new(FixedLocationSource(coords)),
                    None => Box::new(NoLocationSource),
                };

                session.locate(source.as_ref()).await.context(
                    "Could not determine the device location.\n\
                     Hint: pass `--lat` and `--lon`, or add a [location] table to the config file.",
                )?;
                show(&mut session).await
            }
            Command::Recent { clear } => {
                let mut session = open_session(&config)?;
                if clear {
                    session.clear_searches()?;
                    println!("Recent searches cleared.");
                } else {
                    println!("{}", render_recent(session.searches().searches()));
                }
                Ok(())
            }
            Command::Recall { name } => {
                let mut session = open_session(&config)?;
                let snapshot = session
                    .searches()
                    .searches()
                    .iter()
                    .find(|s| s.name == name)
                    .cloned()
                    .ok_or_else(|| anyhow!("\"{name}\" is not among the recent searches."))?;

                session.select_recent(&snapshot)?;
                show(&mut session).await
            }
        }
    }
}

fn open_session(config: &Config) -> anyhow::Result<Session> {
    let storage = Arc::new(FileStore::in_data_dir()?);
    tracing::debug!(dir = %storage.dir().display(), "using data directory");
    Session::load(provider_from_config(config), storage)
}

fn configure(mut config: Config, base_url: Option<String>) -> anyhow::Result<()> {
    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    if api_key.trim().is_empty() {
        bail!("The API key must not be empty.");
    }

    config.set_api_key(api_key.trim().to_string());
    if base_url.is_some() {
        config.base_url = base_url;
    }
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(session: &mut Session) -> anyhow::Result<()> {
    match session.refresh().await? {
        Some(snapshot) => println!("{}", render_snapshot(&snapshot)),
        None => println!(
            "No city selected and no device location known.\n\
             Hint: run `weather search <city>` or `weather locate --lat <lat> --lon <lon>`."
        ),
    }

    Ok(())
}
