use crate::app_config::{AppConfig, Environment, ScoringConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a scoring override is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a scoring override is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_count = |var: &str, default: u32| -> Result<u32, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let parse_positive = |var: &str, default: f64| -> Result<f64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(var, format!("must be a positive number, got {value}")));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("RADAR_ENV", "development"));
    let log_level = or_default("RADAR_LOG_LEVEL", "info");

    let scoring = ScoringConfig {
        min_ads: parse_count("RADAR_MIN_ADS", ScoringConfig::DEFAULT_MIN_ADS)?,
        min_reddit: parse_count("RADAR_MIN_REDDIT", ScoringConfig::DEFAULT_MIN_REDDIT)?,
        max_age_days: parse_positive("RADAR_MAX_AGE_DAYS", ScoringConfig::DEFAULT_MAX_AGE_DAYS)?,
        max_tam_usd: parse_positive("RADAR_MAX_TAM_USD", ScoringConfig::DEFAULT_MAX_TAM_USD)?,
        max_time_to_value_days: parse_positive(
            "RADAR_MAX_TIME_TO_VALUE_DAYS",
            ScoringConfig::DEFAULT_MAX_TIME_TO_VALUE_DAYS,
        )?,
    };

    Ok(AppConfig {
        env,
        log_level,
        scoring,
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
