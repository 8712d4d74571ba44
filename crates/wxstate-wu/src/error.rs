use thiserror::Error;

/// Errors returned by the Weather Underground client.
#[derive(Debug, Error)]
pub enum WuError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned an error envelope (bad key, unknown station).
    #[error("provider error: {0}")]
    ApiError(String),

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
