//! Weather resolution: location name to a formatted answer sentence

use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::weather::WeatherProvider;
use crate::weather::WeatherReport;

/// Answer returned when routing produced no usable location
pub const NO_LOCATION_ANSWER: &str = "Couldn't determine location";

/// Resolves a location name to a current-weather sentence
pub struct WeatherResolver {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherResolver {
    /// Create a new weather resolver
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Geocode the location and fetch current conditions. Every failure is
    /// absorbed into the returned answer string; this never fails the
    /// request.
    pub async fn resolve(&self, location: Option<&str>) -> String {
        // Routing failure fast-path: no location means no external call
        let location = match location {
            Some(l) if !l.trim().is_empty() => l,
            _ => return NO_LOCATION_ANSWER.to_string(),
        };

        match self.fetch(location).await {
            Ok(report) => format_weather(&report),
            Err(e) => {
                warn!("Weather resolution failed for '{}': {}", location, e);
                format!("Error getting weather data: {e}")
            }
        }
    }

    async fn fetch(&self, location: &str) -> crate::Result<WeatherReport> {
        let geocoded = self.provider.geocode(location).await?;
        debug!(
            "Geocoded '{}' to {} ({}, {})",
            location, geocoded.name, geocoded.lat, geocoded.lon
        );
        self.provider
            .current_weather(geocoded.lat, geocoded.lon)
            .await
    }
}

/// Format a weather report as the user-facing answer sentence
pub fn format_weather(report: &WeatherReport) -> String {
    format!(
        "The weather in {} is {} with a temperature of {}°C.",
        report.location, report.description, report.temperature
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_weather_sentence() {
        let report = WeatherReport {
            location: "London".to_string(),
            country: "GB".to_string(),
            description: "overcast clouds".to_string(),
            temperature: 15.5,
            feels_like: Some(14.8),
            humidity: Some(82),
            wind_speed: Some(4.1),
        };
        assert_eq!(
            format_weather(&report),
            "The weather in London is overcast clouds with a temperature of 15.5°C."
        );
    }
}
