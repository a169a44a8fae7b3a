use std::sync::Arc;

use crate::{
    config::UpstreamConfig,
    model::ProxyResponse,
    provider::{WeatherProvider, provider_from_config},
};

/// The `getData` handler: one city in, the upstream document (or an error) out.
///
/// Cheap to clone; every clone shares the same provider.
#[derive(Debug, Clone)]
pub struct WeatherProxy {
    provider: Arc<dyn WeatherProvider>,
    api_key_env: String,
}

impl WeatherProxy {
    pub fn new(provider: Arc<dyn WeatherProvider>, api_key_env: impl Into<String>) -> Self {
        Self {
            provider,
            api_key_env: api_key_env.into(),
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(provider_from_config(config).into(), config.api_key_env.clone())
    }

    /// Handle one request. An absent or empty `city` is rejected before any
    /// network call is made.
    pub async fn get_data(&self, city: Option<&str>) -> ProxyResponse {
        let Some(city) = city.filter(|c| !c.is_empty()) else {
            tracing::info!("rejecting request without city");
            return ProxyResponse::MissingCity;
        };

        let api_key = self.api_key();

        match self.provider.current_weather(city, &api_key).await {
            Ok(body) => {
                tracing::info!(city, "forwarding upstream response");
                ProxyResponse::Weather(body)
            }
            Err(err) => {
                tracing::error!(city, error = %err, "upstream request failed");
                ProxyResponse::UpstreamFailed(err.to_string())
            }
        }
    }

    // Looked up on every call, never cached.
    fn api_key(&self) -> String {
        std::env::var(&self.api_key_env).unwrap_or_else(|_| {
            tracing::warn!(
                var = %self.api_key_env,
                "API key variable is not set, calling upstream with an empty appid"
            );
            String::new()
        })
    }
}
