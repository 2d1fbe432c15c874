//! Session configuration.
//!
//! Provided once at session start. Every field has a default, so a JSON file
//! only needs the values it changes:
//!
//! ```
//! use blockfall_core::EngineConfig;
//!
//! let cfg = EngineConfig::from_json_str(r#"{ "board_width": 12, "instant_down": true }"#).unwrap();
//! assert_eq!(cfg.board_width, 12);
//! assert_eq!(cfg.board_height, 20);
//! assert!(cfg.instant_down);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::Randomizer;
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_DOWN_MOVEMENT_RATE, DEFAULT_FALL_RATES,
    DEFAULT_LATERAL_MOVEMENT_RATE, DEFAULT_LEVEL_THRESHOLDS, MIN_BOARD_WIDTH,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board_width: u16,
    pub board_height: u16,
    /// Held left/right/rotate repeat rate (steps per second)
    pub lateral_movement_rate: f64,
    /// Held move-down repeat rate (steps per second)
    pub down_movement_rate: f64,
    /// Move-down drops the piece all the way and locks it
    pub instant_down: bool,
    /// Fall rate per level, index 0 = level 1
    pub fall_rates: Vec<f64>,
    /// Cumulative lines to reach level 2, 3, ...
    pub level_thresholds: Vec<u32>,
    pub randomizer: Randomizer,
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            lateral_movement_rate: DEFAULT_LATERAL_MOVEMENT_RATE,
            down_movement_rate: DEFAULT_DOWN_MOVEMENT_RATE,
            instant_down: false,
            fall_rates: DEFAULT_FALL_RATES.to_vec(),
            level_thresholds: DEFAULT_LEVEL_THRESHOLDS.to_vec(),
            randomizer: Randomizer::default(),
            seed: None,
        }
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width < MIN_BOARD_WIDTH || self.board_height == 0 {
            return Err(ConfigError::InvalidBoardSize {
                width: self.board_width,
                height: self.board_height,
                min_width: MIN_BOARD_WIDTH,
            });
        }

        check_rate("lateral_movement_rate", self.lateral_movement_rate)?;
        check_rate("down_movement_rate", self.down_movement_rate)?;

        if self.fall_rates.is_empty() {
            return Err(ConfigError::EmptyFallRates);
        }
        for &rate in &self.fall_rates {
            check_rate("fall_rates", rate)?;
        }
        if let Some(index) = self.fall_rates.windows(2).position(|w| w[1] < w[0]) {
            return Err(ConfigError::DecreasingFallRates { index: index + 1 });
        }

        if let Some(index) = self
            .level_thresholds
            .windows(2)
            .position(|w| w[1] <= w[0])
        {
            return Err(ConfigError::UnorderedLevelThresholds { index: index + 1 });
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
