//! The display shell: validates input, fetches, and owns what is on screen.
//!
//! Nothing here guards against overlapping requests. Whichever fetch completes
//! last decides the displayed reading.

use anyhow::Result;
use rand::Rng;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

use crate::{
    config::{Config, Theme},
    decoration::Decorations,
    error::GeolocationError,
    geolocation::Geolocator,
    model::{Location, Units, WeatherReading, WeatherRequest},
    presentation::{PresentationBucket, classify},
    provider::WeatherProvider,
};

/// City shown in the input before the user types anything.
pub const DEFAULT_CITY: &str = "London";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// A transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    fn info(title: &str, description: impl Into<String>) -> Self {
        Self { title: title.to_string(), description: description.into(), severity: Severity::Info }
    }

    fn destructive(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Everything needed to draw the screen.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub reading: Option<WeatherReading>,
    pub bucket: PresentationBucket,
    pub decorations: Decorations,
}

impl DisplayState {
    pub fn background_class(&self) -> String {
        self.bucket.background_class()
    }
}

#[derive(Debug)]
pub struct Shell<P, R> {
    provider: P,
    rng: R,
    config: Config,
    config_path: PathBuf,
    api_key: String,
    city: String,
    units: Units,
    state: DisplayState,
    notifications: Vec<Notification>,
}

impl<P: WeatherProvider, R: Rng> Shell<P, R> {
    /// Load preferences from `config_path` and start with an empty display.
    pub fn new(provider: P, rng: R, config_path: PathBuf) -> Result<Self> {
        let config = Config::load_from(&config_path)?;
        Ok(Self::with_config(provider, rng, config, config_path))
    }

    pub fn with_config(provider: P, rng: R, config: Config, config_path: PathBuf) -> Self {
        let api_key = config.api_key().unwrap_or_default().to_string();

        Self {
            provider,
            rng,
            config,
            config_path,
            api_key,
            city: DEFAULT_CITY.to_string(),
            units: Units::default(),
            state: DisplayState::default(),
            notifications: Vec::new(),
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Update the credential input. Non-blank values are written through.
    pub fn set_api_key(&mut self, api_key: &str) -> Result<()> {
        self.api_key = api_key.to_string();

        if self.config.set_api_key(api_key) {
            self.config.save_to(&self.config_path)?;
        }
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.config.set_theme(theme, &self.config_path)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.config.toggle_theme(&self.config_path)
    }

    /// Fetch by city name.
    #[instrument(skip(self))]
    pub async fn fetch_city(&mut self, city: &str) -> &Notification {
        self.city = city.to_string();

        if self.api_key.trim().is_empty() {
            return self.notify(Notification::destructive(
                "API Key Required",
                "Please enter your OpenWeatherMap API key",
            ));
        }

        if city.trim().is_empty() {
            return self.notify(Notification::destructive(
                "City Required",
                "Please enter a city name",
            ));
        }

        let request = WeatherRequest {
            location: Location::City(city.trim().to_string()),
            api_key: self.api_key.clone(),
            units: self.units,
        };

        match self.provider.get_weather(&request).await {
            Ok(reading) => {
                let description =
                    format!("Weather data for {} has been loaded", reading.location_name);
                self.show(reading);
                self.notify(Notification::info("Weather Updated", description))
            }
            Err(err) => {
                warn!(error = %err, "weather fetch failed");
                self.notify(Notification::destructive(
                    "Error",
                    "Failed to fetch weather data. Please check your API key and city name.",
                ))
            }
        }
    }

    /// Fetch for wherever `geolocator` says we are.
    #[instrument(skip_all)]
    pub async fn fetch_current_location<G>(&mut self, geolocator: &G) -> &Notification
    where
        G: Geolocator + ?Sized,
    {
        let coordinates = match geolocator.locate().await {
            Ok(coordinates) => coordinates,
            Err(GeolocationError::Unsupported(reason)) => {
                warn!(%reason, "geolocation unsupported");
                return self.notify(Notification::destructive(
                    "Geolocation not supported",
                    "Your environment doesn't support geolocation",
                ));
            }
            Err(err) => {
                warn!(error = %err, "geolocation failed");
                return self.notify(Notification::destructive(
                    "Location access denied",
                    "Please allow location access or enter a city manually",
                ));
            }
        };

        if self.api_key.trim().is_empty() {
            return self.notify(Notification::destructive(
                "API Key Required",
                "Please enter your OpenWeatherMap API key first",
            ));
        }

        let request = WeatherRequest {
            location: Location::Coordinates(coordinates),
            api_key: self.api_key.clone(),
            units: self.units,
        };

        match self.provider.get_weather(&request).await {
            Ok(reading) => {
                let description = format!(
                    "Weather data for your location ({}) has been loaded",
                    reading.location_name
                );
                self.city = reading.location_name.clone();
                self.show(reading);
                self.notify(Notification::info("Location Weather Updated", description))
            }
            Err(err) => {
                warn!(error = %err, "location weather fetch failed");
                self.notify(Notification::destructive(
                    "Error",
                    "Failed to fetch weather data for your location",
                ))
            }
        }
    }

    fn show(&mut self, reading: WeatherReading) {
        let category = &reading.primary_condition().category;
        self.state.bucket = classify(category);

        if self.state.decorations.refresh(&reading.weather_type(), &mut self.rng) {
            info!(weather_type = %reading.weather_type(), "decorations regenerated");
        }

        self.state.reading = Some(reading);
    }

    fn notify(&mut self, notification: Notification) -> &Notification {
        self.notifications.push(notification);
        &self.notifications[self.notifications.len() - 1]
    }
}
