//! OpenWeatherMap HTTP client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::RagGraphError;
use crate::errors::Result;
use crate::weather::GeocodedLocation;
use crate::weather::WeatherProvider;
use crate::weather::WeatherReport;

/// Client for the OpenWeatherMap geocoding and current-weather APIs
pub struct OpenWeatherService {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenWeatherService {
    /// Create a new weather service client
    ///
    /// # Errors
    /// - Missing API key
    /// - HTTP client build errors
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(RagGraphError::Config(
                "OpenWeather API key is required. Set weather.api_key in config.toml".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create a client from the application config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.weather.api_key.clone(), config.weather.base_url.clone())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherService {
    async fn geocode(&self, location: &str) -> Result<GeocodedLocation> {
        #[derive(Deserialize)]
        struct GeoEntry {
            name: String,
            #[serde(default)]
            country: String,
            #[serde(default)]
            state: String,
            lat: f64,
            lon: f64,
        }

        let url = format!("{}/geo/1.0/direct", self.base_url);
        debug!("Geocoding location: {}", location);

        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("limit", "1"), ("appid", &self.api_key)])
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagGraphError::Weather(format!(
                "Geocoding API error ({status}): {error_text}"
            )));
        }

        let entries: Vec<GeoEntry> = response
            .json()
            .await
            .map_err(|e| RagGraphError::Weather(format!("Failed to parse response: {e}")))?;

        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| RagGraphError::LocationNotFound(location.to_string()))?;

        Ok(GeocodedLocation {
            name: entry.name,
            country: entry.country,
            state: entry.state,
            lat: entry.lat,
            lon: entry.lon,
        })
    }

    async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherReport> {
        #[derive(Deserialize)]
        struct CurrentWeatherResponse {
            name: Option<String>,
            #[serde(default)]
            weather: Vec<WeatherEntry>,
            main: MainEntry,
            wind: Option<WindEntry>,
            sys: Option<SysEntry>,
        }

        #[derive(Deserialize)]
        struct WeatherEntry {
            description: String,
        }

        #[derive(Deserialize)]
        struct MainEntry {
            temp: f64,
            feels_like: Option<f64>,
            humidity: Option<u64>,
        }

        #[derive(Deserialize)]
        struct WindEntry {
            speed: Option<f64>,
        }

        #[derive(Deserialize)]
        struct SysEntry {
            country: Option<String>,
        }

        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!("Fetching current weather for ({}, {})", lat, lon);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagGraphError::Weather(format!(
                "Weather API error ({status}): {error_text}"
            )));
        }

        let result: CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| RagGraphError::Weather(format!("Failed to parse response: {e}")))?;

        Ok(WeatherReport {
            location: result.name.unwrap_or_else(|| "Unknown".to_string()),
            country: result
                .sys
                .and_then(|s| s.country)
                .unwrap_or_default(),
            description: result
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .unwrap_or_default(),
            temperature: result.main.temp,
            feels_like: result.main.feels_like,
            humidity: result.main.humidity,
            wind_speed: result.wind.and_then(|w| w.speed),
        })
    }
}
