use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};
use crate::queue::EtaEstimator;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunables for the trade queue and its wait-time estimates.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Number of automation-connected devices servicing the queues.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Average observed service time for one trade, in minutes. Operators
    /// tune this against real throughput.
    #[serde(default = "default_minutes_per_trade")]
    pub minutes_per_trade: f64,
    /// Extra displayed wait per later item of a batch, in minutes.
    #[serde(default = "default_batch_step_minutes")]
    pub batch_step_minutes: f64,
    /// Echo the payload the requester traded in once the trade finishes.
    #[serde(default)]
    pub return_traded_payload: bool,
    /// How long an idle worker sleeps before polling its queue again, in
    /// milliseconds.
    #[serde(default = "default_idle_poll_ms")]
    pub idle_poll_ms: u64,
}

const fn default_worker_count() -> usize {
    1
}

fn default_minutes_per_trade() -> f64 {
    1.5
}

fn default_batch_step_minutes() -> f64 {
    1.0
}

const fn default_idle_poll_ms() -> u64 {
    500
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            minutes_per_trade: default_minutes_per_trade(),
            batch_step_minutes: default_batch_step_minutes(),
            return_traded_payload: false,
            idle_poll_ms: default_idle_poll_ms(),
        }
    }
}

impl QueueConfig {
    /// Build the position/ETA estimator from these settings.
    #[must_use]
    pub fn estimator(&self) -> EtaEstimator {
        EtaEstimator::new(
            self.worker_count,
            self.minutes_per_trade,
            self.batch_step_minutes,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.queue.worker_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "queue.worker_count",
                reason: "at least one worker is required".into(),
            }
            .into());
        }
        if self.queue.minutes_per_trade <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "queue.minutes_per_trade",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.queue.batch_step_minutes < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "queue.batch_step_minutes",
                reason: "must not be negative".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.queue.worker_count, 1);
    }

    #[test]
    fn rejects_zero_workers() {
        let config: Config = toml::from_str("[queue]\nworker_count = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nonpositive_service_time() {
        let config: Config = toml::from_str("[queue]\nminutes_per_trade = 0.0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_full_file() {
        let raw = r#"
            [queue]
            worker_count = 3
            minutes_per_trade = 2.5
            batch_step_minutes = 0.5
            return_traded_payload = true

            [logging]
            level = "debug"
            format = "json"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.queue.worker_count, 3);
        assert!(config.queue.return_traded_payload);
        assert_eq!(config.logging.format, "json");
    }
}
