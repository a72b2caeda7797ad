use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Unit system passed to the provider as the `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric | Units::Standard => "m/s",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where a reading should be taken.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates(Coordinates),
}

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub location: Location,
    pub api_key: String,
    pub units: Units,
}

/// One entry of the provider's condition list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Primary classification label, e.g. "Rain" or "Clear".
    pub category: String,
    pub description: String,
    pub icon: String,
}

/// A single current-conditions reading. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    conditions: Vec<Condition>,
    pub wind_speed: f64,
    /// Meters. Some stations omit it.
    pub visibility_m: Option<u32>,
    pub observation_time: DateTime<Utc>,
    pub units: Units,
}

impl WeatherReading {
    /// Builds a reading, rejecting an empty condition list.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        location_name: String,
        temperature: f64,
        feels_like: f64,
        humidity_pct: u8,
        pressure_hpa: f64,
        conditions: Vec<Condition>,
        wind_speed: f64,
        visibility_m: Option<u32>,
        observation_time: DateTime<Utc>,
        units: Units,
    ) -> Result<Self, FetchError> {
        if conditions.is_empty() {
            return Err(FetchError::NoConditions);
        }

        Ok(Self {
            location_name,
            temperature,
            feels_like,
            humidity_pct,
            pressure_hpa,
            conditions,
            wind_speed,
            visibility_m,
            observation_time,
            units,
        })
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn primary_condition(&self) -> &Condition {
        // Non-empty by construction.
        &self.conditions[0]
    }

    /// Lower-cased primary category; this is the key the decorations follow.
    pub fn weather_type(&self) -> String {
        self.primary_condition().category.to_lowercase()
    }
}
