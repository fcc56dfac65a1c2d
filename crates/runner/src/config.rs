//! Run configuration
//!
//! A simulation is described by a small JSON document:
//!
//! ```json
//! {
//!   "name": "news-demo",
//!   "start_tick": 0,
//!   "horizon": 30,
//!   "delivery": "pull",
//!   "data": {
//!     "securities": "securities.csv",
//!     "accounts": "accounts.csv",
//!     "positions": "positions.csv",
//!     "prices": "prices.csv",
//!     "events": "events.csv"
//!   }
//! }
//! ```
//!
//! Relative data paths are resolved against the directory holding the
//! config file.

use herald_core::Tick;
use herald_core::ids::DEFAULT_FIRST_ID;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::simulation::DeliveryMode;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Horizon {horizon} is before start tick {start}")]
    EmptyRange { start: Tick, horizon: Tick },
}

/// Input files for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFiles {
    pub securities: PathBuf,
    pub accounts: PathBuf,
    pub positions: PathBuf,
    pub prices: PathBuf,
    pub events: PathBuf,
    /// Optional batch of orders submitted before the run
    #[serde(default)]
    pub orders: Option<PathBuf>,
}

impl DataFiles {
    /// Make every relative path relative to `base` instead of the cwd
    pub fn resolve_against(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        resolve(&mut self.securities);
        resolve(&mut self.accounts);
        resolve(&mut self.positions);
        resolve(&mut self.prices);
        resolve(&mut self.events);
        if let Some(orders) = self.orders.as_mut() {
            resolve(orders);
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// First tick polled
    #[serde(default)]
    pub start_tick: Tick,
    /// Last tick polled (inclusive)
    #[serde(default = "default_horizon")]
    pub horizon: Tick,
    #[serde(default)]
    pub delivery: DeliveryMode,
    /// Charge each submitted order's fee to its trader after the run
    #[serde(default)]
    pub charge_fees: bool,
    /// First participant and order id handed out
    #[serde(default = "default_first_id")]
    pub first_id: u64,
    pub data: DataFiles,
}

fn default_name() -> String {
    "herald".to_string()
}

fn default_horizon() -> Tick {
    30
}

fn default_first_id() -> u64 {
    DEFAULT_FIRST_ID
}

impl SimulationConfig {
    /// Config with default settings over the given files
    pub fn with_data(data: DataFiles) -> Self {
        Self {
            name: default_name(),
            start_tick: 0,
            horizon: default_horizon(),
            delivery: DeliveryMode::default(),
            charge_fees: false,
            first_id: default_first_id(),
            data,
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&content)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.data.resolve_against(base);
        Ok(config)
    }

    /// Load configuration from a JSON string
    ///
    /// Paths are left as written.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon < self.start_tick {
            return Err(ConfigError::EmptyRange {
                start: self.start_tick,
                horizon: self.horizon,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "data": {
            "securities": "securities.csv",
            "accounts": "accounts.csv",
            "positions": "positions.csv",
            "prices": "prices.csv",
            "events": "events.csv"
        }
    }"#;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::from_json(MINIMAL).unwrap();

        assert_eq!(config.name, "herald");
        assert_eq!(config.start_tick, 0);
        assert_eq!(config.horizon, 30);
        assert_eq!(config.delivery, DeliveryMode::Pull);
        assert!(!config.charge_fees);
        assert_eq!(config.first_id, 1);
        assert_eq!(config.data.orders, None);
        assert_eq!(config.data.events, PathBuf::from("events.csv"));
    }

    #[test]
    fn test_push_mode_and_orders() {
        let json = r#"{
            "name": "push-run",
            "horizon": 10,
            "delivery": "push",
            "data": {
                "securities": "s.csv",
                "accounts": "a.csv",
                "positions": "p.csv",
                "prices": "pr.csv",
                "events": "e.csv",
                "orders": "o.csv"
            }
        }"#;
        let config = SimulationConfig::from_json(json).unwrap();

        assert_eq!(config.delivery, DeliveryMode::Push);
        assert_eq!(config.horizon, 10);
        assert_eq!(config.data.orders, Some(PathBuf::from("o.csv")));
    }

    #[test]
    fn test_rejects_backwards_range() {
        let json = MINIMAL.replacen('{', r#"{ "start_tick": 5, "horizon": 4,"#, 1);
        assert!(matches!(
            SimulationConfig::from_json(&json),
            Err(ConfigError::EmptyRange {
                start: 5,
                horizon: 4
            })
        ));
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        let json = MINIMAL.replacen('{', r#"{ "delivery": "carrier-pigeon","#, 1);
        assert!(matches!(
            SimulationConfig::from_json(&json),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let mut data = SimulationConfig::from_json(MINIMAL).unwrap().data;
        data.orders = Some(PathBuf::from("/abs/orders.csv"));

        data.resolve_against(Path::new("/runs/demo"));

        assert_eq!(data.securities, PathBuf::from("/runs/demo/securities.csv"));
        assert_eq!(data.orders, Some(PathBuf::from("/abs/orders.csv")));
    }
}
