use reqwest::StatusCode;
use serde_json::{Value, json, value::RawValue};

/// Message returned when the request carries no usable `city`.
pub const CITY_REQUIRED: &str = "City is required";

/// Outcome of a single proxy invocation.
///
/// The error shapes differ on purpose: a missing city is reported as
/// `{"error": ...}`, an upstream failure as a bare JSON string.
#[derive(Debug, Clone)]
pub enum ProxyResponse {
    /// Upstream body as received, whatever status upstream used. Only
    /// validated as JSON, never re-serialized.
    Weather(Box<RawValue>),
    MissingCity,
    /// Transport or JSON decoding failure, carrying the error message.
    UpstreamFailed(String),
}

impl ProxyResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyResponse::Weather(_) => StatusCode::OK,
            ProxyResponse::MissingCity => StatusCode::BAD_REQUEST,
            ProxyResponse::UpstreamFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON text of the response body.
    pub fn into_body(self) -> String {
        match self {
            ProxyResponse::Weather(body) => body.get().to_owned(),
            ProxyResponse::MissingCity => json!({ "error": CITY_REQUIRED }).to_string(),
            ProxyResponse::UpstreamFailed(message) => Value::String(message).to_string(),
        }
    }
}
