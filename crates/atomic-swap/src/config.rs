//! Swap configuration from environment variables.

use std::env;

/// Seconds a commitment timestamp may lag behind block time (15 minutes).
pub const DEFAULT_TIMESTAMP_PAST_TOLERANCE_SECS: i64 = 15 * 60;

/// Seconds a commitment timestamp may run ahead of block time (30 minutes).
pub const DEFAULT_TIMESTAMP_FUTURE_TOLERANCE_SECS: i64 = 30 * 60;

/// Agreed average block interval.
pub const DEFAULT_BLOCK_TIME_SECS: i64 = 10;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error) or full directive.
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Runtime configuration for the swap service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapConfig {
    /// How far before block time a commitment timestamp may be.
    pub timestamp_past_tolerance_secs: i64,

    /// How far after block time a commitment timestamp may be.
    pub timestamp_future_tolerance_secs: i64,

    /// Block interval for clock adapters that derive block time from height
    /// (see `ManualClock`). The service reads time only through `ChainClock`.
    pub block_time_secs: i64,

    /// Logging
    pub logging: LoggingConfig,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            timestamp_past_tolerance_secs: DEFAULT_TIMESTAMP_PAST_TOLERANCE_SECS,
            timestamp_future_tolerance_secs: DEFAULT_TIMESTAMP_FUTURE_TOLERANCE_SECS,
            block_time_secs: DEFAULT_BLOCK_TIME_SECS,
            logging: LoggingConfig::default(),
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v: &i64| *v >= 0)
        .unwrap_or(default)
}

impl SwapConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SWAP_TIMESTAMP_PAST_TOLERANCE_SECS` (default: 900)
    /// - `SWAP_TIMESTAMP_FUTURE_TOLERANCE_SECS` (default: 1800)
    /// - `SWAP_BLOCK_TIME_SECS` (default: 10)
    /// - `SWAP_LOG_LEVEL` or `RUST_LOG`: log filter (default: info)
    /// - `SWAP_JSON_LOGS`: JSON output (default: false)
    ///
    /// Unparseable or negative numbers fall back to the default.
    pub fn from_env() -> Self {
        Self {
            timestamp_past_tolerance_secs: env_i64(
                "SWAP_TIMESTAMP_PAST_TOLERANCE_SECS",
                DEFAULT_TIMESTAMP_PAST_TOLERANCE_SECS,
            ),
            timestamp_future_tolerance_secs: env_i64(
                "SWAP_TIMESTAMP_FUTURE_TOLERANCE_SECS",
                DEFAULT_TIMESTAMP_FUTURE_TOLERANCE_SECS,
            ),
            block_time_secs: env_i64("SWAP_BLOCK_TIME_SECS", DEFAULT_BLOCK_TIME_SECS),
            logging: LoggingConfig {
                log_level: env::var("SWAP_LOG_LEVEL")
                    .or_else(|_| env::var("RUST_LOG"))
                    .unwrap_or_else(|_| "info".to_string()),
                json_logs: env::var("SWAP_JSON_LOGS")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(false),
            },
        }
    }
}
