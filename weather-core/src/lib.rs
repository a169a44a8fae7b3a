//! Core library for the OpenWeather proxy.
//!
//! This crate defines:
//! - Configuration (listen address, upstream endpoint, API key variable)
//! - The upstream provider abstraction and its OpenWeather implementation
//! - The `getData` handler and its response model
//!
//! It has no web framework dependency; `weather-proxy` mounts it over HTTP.

pub mod config;
pub mod handler;
pub mod model;
pub mod provider;

pub use config::{Config, DEFAULT_API_KEY_ENV, UpstreamConfig};
pub use handler::WeatherProxy;
pub use model::{CITY_REQUIRED, ProxyResponse};
pub use provider::{ProviderError, WeatherProvider};
