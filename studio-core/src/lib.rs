//! Core library for Weather Studio.
//!
//! This crate defines:
//! - The weather reading model and the OpenWeatherMap provider
//! - Classification of conditions into presentation buckets
//! - Randomized background decorations
//! - Preferences handling and the display shell tying it all together
//!
//! It is used by `weather-studio`, but can also be reused by other front ends.

pub mod config;
pub mod decoration;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod shell;

pub use config::{Config, EndpointConfig, Theme};
pub use decoration::Decorations;
pub use error::{FetchError, GeolocationError};
pub use geolocation::{FixedGeolocator, Geolocator, IpGeolocator, UnsupportedGeolocator};
pub use model::{Condition, Coordinates, Location, Units, WeatherReading, WeatherRequest};
pub use presentation::{PresentationBucket, WeatherIcon, classify};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use shell::{DisplayState, Notification, Severity, Shell};
