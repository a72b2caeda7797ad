use async_trait::async_trait;
use inquire::{Confirm, InquireError};
use weather_studio_core::{Coordinates, GeolocationError, Geolocator};

/// Asks before handing the lookup to `inner`, the way a browser would.
#[derive(Debug)]
pub struct ConsentGeolocator<G> {
    inner: G,
    pre_approved: bool,
}

impl<G> ConsentGeolocator<G> {
    pub fn new(inner: G, pre_approved: bool) -> Self {
        Self { inner, pre_approved }
    }
}

fn ask_permission() -> Result<(), GeolocationError> {
    let answer = Confirm::new("Allow Weather Studio to look up your location?")
        .with_default(false)
        .with_help_message("Your public IP address is sent to the geolocation service")
        .prompt();

    match answer {
        Ok(true) => Ok(()),
        Ok(false) => Err(GeolocationError::Denied),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Err(GeolocationError::Denied)
        }
        Err(InquireError::NotTTY) => Err(GeolocationError::Unsupported(
            "no terminal to ask for permission; pass --allow-location".to_string(),
        )),
        Err(err) => Err(GeolocationError::Unsupported(err.to_string())),
    }
}

#[async_trait]
impl<G: Geolocator> Geolocator for ConsentGeolocator<G> {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        if !self.pre_approved {
            ask_permission()?;
        }

        self.inner.locate().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_studio_core::FixedGeolocator;

    #[tokio::test]
    async fn pre_approved_lookup_skips_prompt() {
        let here = Coordinates { latitude: 48.85, longitude: 2.35 };
        let locator = ConsentGeolocator::new(FixedGeolocator(here), true);

        assert_eq!(locator.locate().await.unwrap(), here);
    }
}
