use crate::{WeatherReading, WeatherRequest, config::EndpointConfig, error::FetchError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// A source of current-conditions readings.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherReading, FetchError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherReading, FetchError> {
        (**self).get_weather(request).await
    }
}

/// Construct the provider described by the endpoint configuration.
pub fn provider_from_config(
    endpoint: &EndpointConfig,
) -> Result<Box<dyn WeatherProvider>, FetchError> {
    Ok(Box::new(OpenWeatherProvider::new(endpoint)?))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
