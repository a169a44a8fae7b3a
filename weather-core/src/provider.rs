use async_trait::async_trait;
use serde_json::value::RawValue;
use std::fmt::Debug;
use thiserror::Error;

use crate::{config::UpstreamConfig, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// Why the upstream call produced no JSON.
///
/// The display text is what callers receive as the 500 body, so transport
/// errors are stored with their URL stripped (it carries the API key).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Transport(reqwest::Error),
    #[error("{0}")]
    Decode(serde_json::Error),
}

impl ProviderError {
    pub fn transport(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.without_url())
    }
}

/// Source of current-weather JSON for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the raw current-weather document. Any completed HTTP exchange
    /// with a JSON body is `Ok`, whatever its status code.
    async fn current_weather(
        &self,
        city: &str,
        api_key: &str,
    ) -> Result<Box<RawValue>, ProviderError>;
}

/// Construct the OpenWeather provider described by the upstream config.
pub fn provider_from_config(config: &UpstreamConfig) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(config.base_url.clone()))
}
