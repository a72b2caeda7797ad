//! Single position fixes on demand.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, instrument};

use crate::{config::EndpointConfig, error::GeolocationError, model::Coordinates};

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    /// Ask once for the current position.
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Looks the position up from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpGeolocator {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, GeolocationError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| GeolocationError::Unsupported(e.to_string()))?;

        Ok(Self { url: endpoint.geolocation_url.clone(), http })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    #[instrument(skip_all)]
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let unavailable = |e: reqwest::Error| GeolocationError::Unavailable(e.to_string());

        let res = self
            .http
            .get(&self.url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;

        let parsed: IpApiResponse = res.json().await.map_err(unavailable)?;
        debug!(status = %parsed.status, "geolocation lookup finished");

        match (parsed.status.as_str(), parsed.lat, parsed.lon) {
            ("success", Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
            _ => Err(GeolocationError::Unavailable(
                parsed.message.unwrap_or_else(|| "lookup returned no position".to_string()),
            )),
        }
    }
}

/// Always answers with the same fix, e.g. from `--lat/--lon`.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Stands in when no lookup can be set up at all.
#[derive(Debug, Clone)]
pub struct UnsupportedGeolocator(pub String);

#[async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported(self.0.clone()))
    }
}
