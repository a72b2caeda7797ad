use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single fetch attempt. None of them is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No API key was provided")]
    MissingApiKey,

    #[error("No city was provided")]
    MissingCity,

    #[error("Request to the weather provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Weather provider response contained no conditions")]
    NoConditions,
}

/// Failures of a position lookup.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported here: {0}")]
    Unsupported(String),

    #[error("Location access was denied")]
    Denied,

    #[error("Position is unavailable: {0}")]
    Unavailable(String),
}
