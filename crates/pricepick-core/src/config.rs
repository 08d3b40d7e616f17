use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Marketing terms removed from raw product names unless overridden via
/// `PRICEPICK_QUERY_STOP_TERMS`.
const DEFAULT_STOP_TERMS: &str = "정품,공식판매처,구매대행";

const DEFAULT_AFFILIATE_LINK: &str = "https://link.coupang.com/a/dfyI2Y";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let naver_client_id = require("NAVER_CLIENT_ID")?;
    let naver_client_secret = require("NAVER_CLIENT_SECRET")?;

    // The deploy platform hands out the listen port via PORT.
    let port = parse_u16("PORT", "5000")?;
    let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);

    let log_level = or_default("PRICEPICK_LOG_LEVEL", "info");
    let search_timeout_secs = parse_u64("PRICEPICK_SEARCH_TIMEOUT_SECS", "10")?;
    let min_total_price = parse_i64("PRICEPICK_MIN_TOTAL_PRICE", "5000")?;
    let query_max_chars = parse_usize("PRICEPICK_QUERY_MAX_CHARS", "25")?;
    let query_stop_terms = split_terms(&or_default("PRICEPICK_QUERY_STOP_TERMS", DEFAULT_STOP_TERMS));
    let affiliate_link = or_default("PRICEPICK_AFFILIATE_LINK", DEFAULT_AFFILIATE_LINK);

    Ok(AppConfig {
        naver_client_id,
        naver_client_secret,
        bind_addr,
        log_level,
        search_timeout_secs,
        min_total_price,
        query_max_chars,
        query_stop_terms,
        affiliate_link,
    })
}

/// Split a comma-separated term list, dropping empty entries.
fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
