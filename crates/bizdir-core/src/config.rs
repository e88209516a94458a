use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
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
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("BIZDIR_ENV", "development"));
    let log_level = or_default("BIZDIR_LOG_LEVEL", "info");

    let geocode_api_key = lookup("OPENCAGE_API_KEY").ok();
    let geocode_base_url = or_default(
        "BIZDIR_GEOCODE_BASE_URL",
        "https://api.opencagedata.com/geocode/v1/json",
    );
    let geocode_timeout_secs = parse_u64("BIZDIR_GEOCODE_TIMEOUT_SECS", "10")?;

    let suggestion_limit = parse_usize("BIZDIR_SUGGESTION_LIMIT", "5")?;
    let suggestion_country_code = or_default("BIZDIR_SUGGESTION_COUNTRY_CODE", "za");
    let suggestion_min_query_len = parse_usize("BIZDIR_SUGGESTION_MIN_QUERY_LEN", "3")?;

    let records_path = PathBuf::from(or_default("BIZDIR_RECORDS_PATH", "./data/businesses.json"));

    Ok(AppConfig {
        env,
        log_level,
        geocode_api_key,
        geocode_base_url,
        geocode_timeout_secs,
        suggestion_limit,
        suggestion_country_code,
        suggestion_min_query_len,
        records_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
