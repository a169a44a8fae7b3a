use async_trait::async_trait;
use reqwest::Client;
use serde_json::value::RawValue;

use super::{ProviderError, WeatherProvider};

/// OpenWeather current-weather endpoint.
pub const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

pub const UNITS: &str = "metric";
pub const LANG: &str = "uk";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// Full request URL. The city goes in exactly as received, without
    /// percent-encoding, so `&` or `#` in a name will split the query.
    pub fn request_url(&self, city: &str, api_key: &str) -> String {
        format!(
            "{}?q={city}&units={UNITS}&lang={LANG}&appid={api_key}",
            self.base_url
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        city: &str,
        api_key: &str,
    ) -> Result<Box<RawValue>, ProviderError> {
        let url = self.request_url(city, api_key);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ProviderError::transport)?;

        let status = res.status();
        let body = res.text().await.map_err(ProviderError::transport)?;

        tracing::debug!(%status, bytes = body.len(), "OpenWeather responded");

        serde_json::from_str(&body).map_err(ProviderError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        extract::RawQuery,
        http::{StatusCode, header::CONTENT_TYPE},
        routing::get,
    };
    use std::sync::{Arc, Mutex};

    const LONDON: &str = r#"{"name":"London","main":{"temp":15.00},"cod":200}"#;
    const NOT_FOUND: &str = r#"{"cod":"404","message":"city not found"}"#;

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/data/2.5/weather")
    }

    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/data/2.5/weather")
    }

    #[test]
    fn request_url_pins_units_and_lang() {
        let provider = OpenWeatherProvider::new(CURRENT_WEATHER_URL.to_string());

        for city in ["London", "Київ", "New York", ""] {
            let url = provider.request_url(city, "KEY");
            assert!(url.contains("units=metric&lang=uk"), "{url}");
            assert!(url.ends_with("&appid=KEY"), "{url}");
        }
    }

    #[test]
    fn request_url_embeds_city_unencoded() {
        let provider = OpenWeatherProvider::new(CURRENT_WEATHER_URL.to_string());

        assert_eq!(
            provider.request_url("Rio de Janeiro", "abc"),
            "https://api.openweathermap.org/data/2.5/weather?q=Rio de Janeiro&units=metric&lang=uk&appid=abc"
        );
    }

    #[tokio::test]
    async fn forwards_query_and_returns_body_text_unchanged() {
        let seen = Arc::new(Mutex::new(None::<String>));
        let seen_in_route = seen.clone();
        let router = Router::new().route(
            "/data/2.5/weather",
            get(move |RawQuery(query): RawQuery| {
                let seen = seen_in_route.clone();
                async move {
                    *seen.lock().unwrap() = query;
                    ([(CONTENT_TYPE, "application/json")], LONDON)
                }
            }),
        );
        let provider = OpenWeatherProvider::new(spawn_upstream(router).await);

        let body = provider.current_weather("London", "SECRET").await.unwrap();

        assert_eq!(body.get(), LONDON);
        assert_eq!(
            seen.lock().unwrap().as_deref(),
            Some("q=London&units=metric&lang=uk&appid=SECRET")
        );
    }

    #[tokio::test]
    async fn upstream_error_status_is_still_ok() {
        let router = Router::new().route(
            "/data/2.5/weather",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    [(CONTENT_TYPE, "application/json")],
                    NOT_FOUND,
                )
            }),
        );
        let provider = OpenWeatherProvider::new(spawn_upstream(router).await);

        let body = provider.current_weather("Atlantis", "KEY").await.unwrap();

        assert_eq!(body.get(), NOT_FOUND);
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let router = Router::new().route("/data/2.5/weather", get(|| async { "<html>oops</html>" }));
        let provider = OpenWeatherProvider::new(spawn_upstream(router).await);

        let err = provider.current_weather("London", "KEY").await.unwrap_err();

        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error_without_key() {
        let provider = OpenWeatherProvider::new(closed_port_url().await);

        let err = provider
            .current_weather("London", "TOP_SECRET_KEY")
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
        assert_eq!(err.to_string(), "error sending request");
    }
}
