//! Shared configuration and input loading for the DemandRadar workspace.

mod app_config;
mod config;
mod input;

pub use app_config::{AppConfig, Environment, ScoringConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use input::load_input_file;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read input file {path}: {source}")]
    InputFileIo {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse input file: {0}")]
    InputFileParse(String),
}
