use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};
use tracing::debug;
use weather_studio_core::{
    Config, Coordinates, FixedGeolocator, Geolocator, IpGeolocator, Notification, Shell, Theme,
    Units, UnsupportedGeolocator, WeatherProvider, provider::provider_from_config,
};

use crate::{location::ConsentGeolocator, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-studio",
    version,
    about = "Current weather with animated skies, from OpenWeatherMap"
)]
pub struct Cli {
    /// Preferences file to use instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store your OpenWeatherMap API key.
    Configure,

    /// Show the weather for a city.
    Show {
        /// City name; defaults to London.
        city: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show the weather where you are.
    Locate {
        /// Skip the permission prompt.
        #[arg(long)]
        allow_location: bool,

        /// Use this latitude instead of looking the position up.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Use this longitude instead of looking the position up.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Switch between the dark and light theme.
    Theme {
        #[arg(value_enum, default_value_t = ThemeChoice::Toggle)]
        choice: ThemeChoice,
    },
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// OpenWeatherMap API key; saved for next time.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, value_enum, default_value_t = UnitsArg::Metric)]
    pub units: UnitsArg,

    /// Animate the sky for this many seconds.
    #[arg(long, value_name = "SECS")]
    pub animate: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    Metric,
    Imperial,
    Standard,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Metric => Units::Metric,
            UnitsArg::Imperial => Units::Imperial,
            UnitsArg::Standard => Units::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

type StudioShell = Shell<Box<dyn WeatherProvider>, StdRng>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        debug!(path = %config_path.display(), "using preferences file");

        match self.command {
            Command::Configure => configure(config_path),
            Command::Show { city, display } => {
                let mut shell = open_shell(config_path, &display)?;
                let city = city.unwrap_or_else(|| shell.city().to_string());

                render::print_loading(shell.theme());
                let notification = shell.fetch_city(&city).await.clone();
                present(&shell, &notification, &display).await
            }
            Command::Locate { allow_location, lat, lon, display } => {
                let mut shell = open_shell(config_path, &display)?;

                let geolocator: Box<dyn Geolocator> = match (lat, lon) {
                    (Some(latitude), Some(longitude)) => {
                        Box::new(FixedGeolocator(Coordinates { latitude, longitude }))
                    }
                    _ => match IpGeolocator::new(&shell.config().endpoint) {
                        Ok(lookup) => Box::new(ConsentGeolocator::new(lookup, allow_location)),
                        Err(err) => Box::new(UnsupportedGeolocator(err.to_string())),
                    },
                };

                render::print_loading(shell.theme());
                let notification = shell.fetch_current_location(geolocator.as_ref()).await.clone();
                present(&shell, &notification, &display).await
            }
            Command::Theme { choice } => {
                let theme = apply_theme(&config_path, choice)?;
                println!("Theme set to {theme}");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn apply_theme(config_path: &Path, choice: ThemeChoice) -> anyhow::Result<Theme> {
    let mut config = Config::load_from(config_path)?;

    match choice {
        ThemeChoice::Dark => config.set_theme(Theme::Dark, config_path)?,
        ThemeChoice::Light => config.set_theme(Theme::Light, config_path)?,
        ThemeChoice::Toggle => {
            config.toggle_theme(config_path)?;
        }
    }

    Ok(config.theme)
}

fn configure(config_path: PathBuf) -> anyhow::Result<ExitCode> {
    let mut config = Config::load_from(&config_path)?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .with_help_message("Get your free API key from https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    if !config.set_api_key(&api_key) {
        println!("API key unchanged.");
        return Ok(ExitCode::SUCCESS);
    }

    config.save_to(&config_path)?;
    println!("API key saved to {}", config_path.display());
    Ok(ExitCode::SUCCESS)
}

fn open_shell(config_path: PathBuf, display: &DisplayArgs) -> anyhow::Result<StudioShell> {
    let config = Config::load_from(&config_path)?;
    let provider = provider_from_config(&config.endpoint)?;

    let mut shell = Shell::with_config(provider, StdRng::from_entropy(), config, config_path);
    if let Some(api_key) = &display.api_key {
        shell.set_api_key(api_key)?;
    }
    shell.set_units(display.units.into());

    Ok(shell)
}

async fn present(
    shell: &StudioShell,
    notification: &Notification,
    display: &DisplayArgs,
) -> anyhow::Result<ExitCode> {
    render::print_notification(notification);

    if notification.is_error() {
        return Ok(ExitCode::FAILURE);
    }

    match display.animate {
        Some(secs) => {
            render::animate(shell.state(), shell.theme(), Duration::from_secs(secs)).await?
        }
        None => {
            render::print_sky(shell.state())?;
            render::print_card(shell.state(), shell.theme());
        }
    }

    Ok(ExitCode::SUCCESS)
}
