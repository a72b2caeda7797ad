use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::EndpointConfig,
    error::FetchError,
    model::{Condition, Location, WeatherReading, WeatherRequest},
};

use super::{WeatherProvider, truncate_body};

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: endpoint.weather_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn query(request: &WeatherRequest) -> Vec<(&'static str, String)> {
        let mut query = match &request.location {
            Location::City(city) => vec![("q", city.trim().to_string())],
            Location::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        };

        query.push(("appid", request.api_key.trim().to_string()));
        query.push(("units", request.units.as_str().to_string()));
        query
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: Option<u32>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip_all, fields(location = ?request.location, units = %request.units))]
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherReading, FetchError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let res = self.http.get(&url).query(&Self::query(request)).send().await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "OpenWeather responded");

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let observation_time = parsed
            .dt
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        let conditions = parsed
            .weather
            .into_iter()
            .map(|w| Condition { category: w.main, description: w.description, icon: w.icon })
            .collect();

        WeatherReading::new(
            parsed.name,
            parsed.main.temp,
            parsed.main.feels_like,
            parsed.main.humidity,
            parsed.main.pressure,
            conditions,
            parsed.wind.speed,
            parsed.visibility,
            observation_time,
            request.units,
        )
    }
}
