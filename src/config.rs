// src/config.rs
use crate::models::{Period, SecurityTerm};
use crate::services::error::ApiError;
use log::{info, warn};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3030/api/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub history_days: u32,
    pub auction_limit: u32,
    pub request_timeout: Duration,
    pub default_term: SecurityTerm,
    pub default_period: Period,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            api_base_url: DEFAULT_API_URL.to_string(),
            history_days: 7,
            auction_limit: 10,
            request_timeout: Duration::from_secs(30),
            default_term: SecurityTerm::default(),
            default_period: Period::default(),
        }
    }
}

impl DashboardConfig {
    /// Reads `.env` (if present) and the `DASHBOARD_*` variables.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DashboardConfig::default();

        let api_base_url = lookup("DASHBOARD_API_URL").unwrap_or_else(|| {
            warn!("DASHBOARD_API_URL not set, defaulting to {}", DEFAULT_API_URL);
            defaults.api_base_url.clone()
        });
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ApiError::config_error(format!(
                "DASHBOARD_API_URL must be an http(s) URL, got '{}'",
                api_base_url
            )));
        }

        let history_days = parse_var(&lookup, "DASHBOARD_HISTORY_DAYS", defaults.history_days)?;
        let auction_limit = parse_var(&lookup, "DASHBOARD_AUCTION_LIMIT", defaults.auction_limit)?;
        let timeout_secs = parse_var(&lookup, "DASHBOARD_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;
        let default_term = parse_var(&lookup, "DASHBOARD_TERM", defaults.default_term)?;
        let period_years = parse_var(&lookup, "DASHBOARD_PERIOD_YEARS", defaults.default_period.years())?;
        let default_period = Period::try_from(period_years).map_err(ApiError::config_error)?;

        let config = DashboardConfig {
            api_base_url,
            history_days,
            auction_limit,
            request_timeout: Duration::from_secs(timeout_secs),
            default_term,
            default_period,
        };
        info!("Dashboard configuration loaded: {:?}", config);
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ApiError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| {
            ApiError::config_error(format!("{} has an invalid value '{}': {}", key, raw, e))
        }),
        None => {
            warn!("{} not set, defaulting to {}", key, default);
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::error::ApiErrorKind;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("DASHBOARD_API_URL", "https://dash.example.com/api/v1"),
            ("DASHBOARD_HISTORY_DAYS", "14"),
            ("DASHBOARD_TERM", "30-Year"),
            ("DASHBOARD_PERIOD_YEARS", "20"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://dash.example.com/api/v1");
        assert_eq!(config.history_days, 14);
        assert_eq!(config.default_term, SecurityTerm::ThirtyYear);
        assert_eq!(config.default_period, Period::TwentyYears);
        assert_eq!(config.auction_limit, 10);
    }

    #[test]
    fn malformed_values_are_config_errors() {
        let err = DashboardConfig::from_lookup(lookup_from(&[("DASHBOARD_HISTORY_DAYS", "a week")]))
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Config);

        let err = DashboardConfig::from_lookup(lookup_from(&[("DASHBOARD_PERIOD_YEARS", "4")]))
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Config);

        let err = DashboardConfig::from_lookup(lookup_from(&[("DASHBOARD_API_URL", "localhost:3030")]))
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Config);
    }
}
