use crate::units::UnitSystem;

/// Per-quantity display precision and date/time formats.
///
/// Applied only to the display copy of a value; the stored numeric copy keeps
/// internal precision. Decimal counts are validated to 0–2 at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub temperature_decimals: u8,
    pub wind_decimals: u8,
    pub humidity_decimals: u8,
    pub date_format: String,
    pub time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            temperature_decimals: 1,
            wind_decimals: 1,
            humidity_decimals: 1,
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub units: UnitSystem,
    pub display: DisplayConfig,
    pub wu_api_key: Option<String>,
    pub wu_request_timeout_secs: u64,
    pub wu_max_retries: u32,
    pub wu_retry_backoff_base_ms: u64,
    pub wu_user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("units", &self.units)
            .field("display", &self.display)
            .field("wu_api_key", &self.wu_api_key.as_ref().map(|_| "[redacted]"))
            .field("wu_request_timeout_secs", &self.wu_request_timeout_secs)
            .field("wu_max_retries", &self.wu_max_retries)
            .field("wu_retry_backoff_base_ms", &self.wu_retry_backoff_base_ms)
            .field("wu_user_agent", &self.wu_user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
