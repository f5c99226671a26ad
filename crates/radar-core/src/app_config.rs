use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Thresholds and anchors used by the scoring formulas.
///
/// Every field has a fixed default; the environment can override them via
/// `RADAR_*` variables (see [`crate::load_app_config`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Ad count at which ad data is considered sufficient.
    pub min_ads: u32,
    /// Reddit mention count at which forum data is considered sufficient.
    pub min_reddit: u32,
    /// Average data age (days) at which recency reaches zero.
    pub max_age_days: f64,
    /// TAM ceiling in USD used to normalize market size.
    pub max_tam_usd: f64,
    /// Time-to-value (days) at which the factor bottoms out.
    pub max_time_to_value_days: f64,
}

impl ScoringConfig {
    pub const DEFAULT_MIN_ADS: u32 = 30;
    pub const DEFAULT_MIN_REDDIT: u32 = 50;
    pub const DEFAULT_MAX_AGE_DAYS: f64 = 90.0;
    pub const DEFAULT_MAX_TAM_USD: f64 = 10_000_000_000.0;
    pub const DEFAULT_MAX_TIME_TO_VALUE_DAYS: f64 = 90.0;
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_ads: Self::DEFAULT_MIN_ADS,
            min_reddit: Self::DEFAULT_MIN_REDDIT,
            max_age_days: Self::DEFAULT_MAX_AGE_DAYS,
            max_tam_usd: Self::DEFAULT_MAX_TAM_USD,
            max_time_to_value_days: Self::DEFAULT_MAX_TIME_TO_VALUE_DAYS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub scoring: ScoringConfig,
}
