use std::env;
use std::path::PathBuf;

use crate::adapters::powercap::DEFAULT_ENERGY_PATH;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Samples retained per endpoint; 0 keeps everything.
    pub capacity: usize,
    pub energy_path: PathBuf,
    /// With recording off no store is created and /metrics answers 503.
    pub recording: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("WATTMON_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            capacity: env::var("WATTMON_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),
            energy_path: env::var("WATTMON_ENERGY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENERGY_PATH)),
            recording: env::var("WATTMON_RECORDING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            log_level: env::var("WATTMON_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
