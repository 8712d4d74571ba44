//! HTTP client for the Weather Underground data API.
//!
//! Wraps `reqwest` with provider-specific error handling and returns the raw
//! JSON document for each category — the extraction pipeline wants the
//! loosely-structured payload, not a typed deserialization that would reject
//! exactly the malformed documents it exists to survive. Documents are
//! requested in imperial units; unit conversion is the pipeline's job.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::WuError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.weather.com/";

/// Client for the Weather Underground REST API.
///
/// Use [`WuClient::new`] for production or [`WuClient::with_base_url`] to
/// point at a mock server in tests.
pub struct WuClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl WuClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`WuError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, WuError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WuError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`WuError::ApiError`] if `base_url` is not a valid
    /// URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, WuError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("wxstate/0.1 (weather-states)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| WuError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the retry policy for transient failures.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches the current personal-weather-station observation document for
    /// `station_id`, in imperial units.
    ///
    /// # Errors
    ///
    /// - [`WuError::ApiError`] if the provider returns an error envelope.
    /// - [`WuError::Http`] on network failure or non-2xx status after
    ///   retries are exhausted.
    /// - [`WuError::Deserialize`] if the body is not valid JSON.
    pub async fn current_conditions(&self, station_id: &str) -> Result<Value, WuError> {
        let url = self.build_url(
            "v2/pws/observations/current",
            &[("stationId", station_id), ("units", "e"), ("format", "json")],
        );
        self.fetch_document(&url).await
    }

    /// Fetches the daily forecast document for a `geocode`
    /// (`"33.74,-84.39"`), in imperial units.
    ///
    /// # Errors
    ///
    /// Same as [`WuClient::current_conditions`].
    pub async fn daily_forecast(&self, geocode: &str) -> Result<Value, WuError> {
        let url = self.build_url(
            "v3/wx/forecast/daily/10day",
            &[
                ("geocode", geocode),
                ("units", "e"),
                ("language", "en-US"),
                ("format", "json"),
            ],
        );
        self.fetch_document(&url).await
    }

    async fn fetch_document(&self, url: &Url) -> Result<Value, WuError> {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_json(url)
        })
        .await?;
        Self::check_api_error(&body)?;
        Ok(body)
    }

    /// Builds the full request URL with percent-encoded query parameters and
    /// the API key appended last.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("apiKey", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as
    /// JSON.
    async fn request_json(&self, url: &Url) -> Result<Value, WuError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WuError::Deserialize {
            context: redact_key(url),
            source: e,
        })
    }

    /// Surfaces the provider's `"errors"` envelope as a typed error.
    fn check_api_error(body: &Value) -> Result<(), WuError> {
        let Some(errors) = body.get("errors").and_then(Value::as_array) else {
            return Ok(());
        };
        let msg = errors
            .first()
            .and_then(|e| e.get("error"))
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("unknown provider error")
            .to_string();
        Err(WuError::ApiError(msg))
    }
}

/// The API key must not leak into logs or error contexts.
fn redact_key(url: &Url) -> String {
    let mut safe = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == "apiKey" {
                (k.into_owned(), "[redacted]".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    safe.query_pairs_mut().clear().extend_pairs(pairs);
    safe.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> WuClient {
        WuClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://api.weather.com");
        let url = client.build_url(
            "v2/pws/observations/current",
            &[("stationId", "KMAHANOV10"), ("units", "e"), ("format", "json")],
        );
        assert_eq!(
            url.as_str(),
            "https://api.weather.com/v2/pws/observations/current?stationId=KMAHANOV10&units=e&format=json&apiKey=test-key"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://api.weather.com/");
        let url = client.build_url("v3/wx/forecast/daily/10day", &[("geocode", "33.74,-84.39")]);
        assert!(url
            .as_str()
            .starts_with("https://api.weather.com/v3/wx/forecast/daily/10day?geocode="));
    }

    #[test]
    fn redact_key_masks_the_api_key_only() {
        let client = test_client("https://api.weather.com");
        let url = client.build_url("v2/pws/observations/current", &[("stationId", "KX")]);
        let redacted = redact_key(&url);
        assert!(!redacted.contains("test-key"));
        assert!(redacted.contains("stationId=KX"));
        assert!(redacted.contains("apiKey=%5Bredacted%5D") || redacted.contains("apiKey=[redacted]"));
    }

    #[test]
    fn check_api_error_passes_clean_documents() {
        let body = serde_json::json!({"observations": []});
        assert!(WuClient::check_api_error(&body).is_ok());
    }

    #[test]
    fn check_api_error_surfaces_the_first_message() {
        let body = serde_json::json!({
            "errors": [{"error": {"code": "CDN-0001", "message": "Invalid apiKey."}}]
        });
        let err = WuClient::check_api_error(&body).unwrap_err();
        assert!(err.to_string().contains("Invalid apiKey."));
    }
}
