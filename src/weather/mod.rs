//! Weather service adapter
//!
//! Wraps the OpenWeatherMap geocoding and current-weather endpoints. Both
//! calls carry a bounded timeout; the service is untrusted for liveness and
//! every failure here is recovered locally by the weather resolver.

pub mod openweather;

pub use openweather::OpenWeatherService;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::Result;

/// Result of geocoding a location name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodedLocation {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub state: String,
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for a coordinate pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub country: String,
    pub description: String,
    pub temperature: f64,
    pub feels_like: Option<f64>,
    pub humidity: Option<u64>,
    pub wind_speed: Option<f64>,
}

/// Geocoding + current-weather adapter boundary
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve a location name to coordinates. Fails with `LocationNotFound`
    /// when the provider returns zero matches.
    async fn geocode(&self, location: &str) -> Result<GeocodedLocation>;

    /// Fetch current weather for coordinates, metric units
    async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherReport>;
}
