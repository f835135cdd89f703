use crate::{
    Config, FetchError, WeatherRecord, WeatherRequest,
    config::API_KEY_ENV_VARS,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Issue exactly one request for the current conditions in `request.city`.
    async fn current_weather(&self, request: &WeatherRequest) -> Result<WeatherRecord, FetchError>;
}

/// Construct the weather provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        let location = Config::config_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "config.toml".to_string());
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: set `api_key` in {location} or export {}.",
            API_KEY_ENV_VARS.join(" / ")
        )
    })?;

    let provider = OpenWeatherProvider::builder(api_key.to_owned())
        .base_url(config.base_url())
        .timeout(config.timeout())
        .build()?;

    Ok(Box::new(provider))
}
