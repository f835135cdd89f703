use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
    error::FetchError,
    model::{WeatherRecord, WeatherRequest},
};

use super::WeatherProvider;

/// Client for the OpenWeather "current weather data" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug)]
pub struct OpenWeatherProviderBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> anyhow::Result<OpenWeatherProvider> {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(OpenWeatherProvider { api_key: self.api_key, base_url: self.base_url, http })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherProviderBuilder {
        OpenWeatherProviderBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    async fn fetch_current(&self, request: &WeatherRequest) -> Result<WeatherRecord, FetchError> {
        let url = format!("{}/weather", self.base_url);

        tracing::debug!(city = %request.city, units = %request.units, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", request.city.as_str()),
                ("units", request.units.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        match status {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(FetchError::CityNotFound { city: request.city.to_string() });
            }
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
            _ => {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    body: truncate_body(&body),
                });
            }
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let (description, condition_code) = parsed
            .weather
            .first()
            .map(|w| (w.description.clone(), w.id))
            .unwrap_or_else(|| ("unknown".to_string(), None));

        Ok(WeatherRecord {
            city: parsed.name,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed: parsed.wind.speed,
            description,
            condition_code,
            observed_at: parsed.dt.and_then(unix_to_utc),
            units: request.units,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: Option<u16>,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, request: &WeatherRequest) -> Result<WeatherRecord, FetchError> {
        self.fetch_current(request).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
