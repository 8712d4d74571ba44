use crate::app_config::{AppConfig, DisplayConfig};
use crate::units::UnitSystem;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files — useful for testing or when the
/// caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Display precision is capped at two decimal places; anything finer is
    // noise for weather readings and breaks the fixed-width UI fields.
    let parse_decimals = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        let n = raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if n > 2 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("decimal places must be 0-2, got {n}"),
            });
        }
        Ok(n)
    };

    let units_raw = or_default("WXSTATE_UNITS", "standard");
    let units = UnitSystem::parse(&units_raw).ok_or_else(|| ConfigError::InvalidEnvVar {
        var: "WXSTATE_UNITS".to_string(),
        reason: format!("expected standard|metric|mixed|mixed-si, got '{units_raw}'"),
    })?;

    let display = DisplayConfig {
        temperature_decimals: parse_decimals("WXSTATE_TEMP_DECIMALS", "1")?,
        wind_decimals: parse_decimals("WXSTATE_WIND_DECIMALS", "1")?,
        humidity_decimals: parse_decimals("WXSTATE_HUMIDITY_DECIMALS", "1")?,
        date_format: or_default("WXSTATE_DATE_FORMAT", "%Y-%m-%d"),
        time_format: or_default("WXSTATE_TIME_FORMAT", "%H:%M"),
    };

    let wu_api_key = lookup("WU_API_KEY").ok();
    let wu_request_timeout_secs = parse_u64("WXSTATE_WU_REQUEST_TIMEOUT_SECS", "10")?;
    let wu_max_retries = parse_u32("WXSTATE_WU_MAX_RETRIES", "3")?;
    let wu_retry_backoff_base_ms = parse_u64("WXSTATE_WU_RETRY_BACKOFF_BASE_MS", "1000")?;
    let wu_user_agent = or_default("WXSTATE_WU_USER_AGENT", "wxstate/0.1 (weather-states)");
    let log_level = or_default("WXSTATE_LOG_LEVEL", "info");

    Ok(AppConfig {
        units,
        display,
        wu_api_key,
        wu_request_timeout_secs,
        wu_max_retries,
        wu_retry_backoff_base_ms,
        wu_user_agent,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.units, UnitSystem::Standard);
        assert_eq!(cfg.display.temperature_decimals, 1);
        assert_eq!(cfg.display.wind_decimals, 1);
        assert_eq!(cfg.display.humidity_decimals, 1);
        assert!(cfg.wu_api_key.is_none());
        assert_eq!(cfg.wu_request_timeout_secs, 10);
        assert_eq!(cfg.wu_max_retries, 3);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_app_config_reads_unit_system() {
        let mut map = HashMap::new();
        map.insert("WXSTATE_UNITS", "mixed-si");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.units, UnitSystem::MixedSi);
    }

    #[test]
    fn build_app_config_rejects_unknown_unit_system() {
        let mut map = HashMap::new();
        map.insert("WXSTATE_UNITS", "imperial");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WXSTATE_UNITS"),
            "expected InvalidEnvVar(WXSTATE_UNITS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_precision_above_two() {
        let mut map = HashMap::new();
        map.insert("WXSTATE_TEMP_DECIMALS", "3");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WXSTATE_TEMP_DECIMALS"),
            "expected InvalidEnvVar(WXSTATE_TEMP_DECIMALS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_numeric_precision() {
        let mut map = HashMap::new();
        map.insert("WXSTATE_WIND_DECIMALS", "one");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WXSTATE_WIND_DECIMALS"),
            "expected InvalidEnvVar(WXSTATE_WIND_DECIMALS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_accepts_zero_decimals() {
        let mut map = HashMap::new();
        map.insert("WXSTATE_TEMP_DECIMALS", "0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.display.temperature_decimals, 0);
    }

    #[test]
    fn build_app_config_reads_api_key() {
        let mut map = HashMap::new();
        map.insert("WU_API_KEY", "abc123");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.wu_api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut map = HashMap::new();
        map.insert("WU_API_KEY", "super-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
