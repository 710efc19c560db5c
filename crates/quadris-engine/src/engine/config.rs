use std::{ops::RangeInclusive, time::Duration};

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Rules configuration fixed for the lifetime of a session.
///
/// Deserializes from partial input: missing fields take their default.
///
/// ```
/// use quadris_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "width": 8 }"#).unwrap();
/// assert_eq!(config.width, 8);
/// assert_eq!(config.height, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of board columns.
    pub width: usize,
    /// Number of board rows.
    pub height: usize,
    /// Drop-speed curve.
    pub gravity: GravityCurve,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            gravity: GravityCurve::default(),
        }
    }
}

impl EngineConfig {
    /// Accepted range for both board dimensions.
    ///
    /// The lower bound keeps the I-piece placeable.
    pub const DIMENSION_RANGE: RangeInclusive<usize> = 4..=64;

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !Self::DIMENSION_RANGE.contains(&value) {
                return Err(ConfigError::Dimension { name, value });
            }
        }
        self.gravity.validate()
    }
}

/// Gravity period as a function of level:
/// `max(min_interval, base_interval × decay_factor^(level − 1))`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GravityCurve {
    pub base_interval_ms: u64,
    pub decay_factor: f64,
    pub min_interval_ms: u64,
}

impl Default for GravityCurve {
    fn default() -> Self {
        Self {
            base_interval_ms: 1000,
            decay_factor: 0.9,
            min_interval_ms: 100,
        }
    }
}

impl GravityCurve {
    /// Returns the advisory time between two gravity ticks at `level`.
    ///
    /// Levels below 1 are treated as level 1.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn interval(&self, level: usize) -> Duration {
        let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
        let decayed = self.base_interval_ms as f64 * self.decay_factor.powi(exponent);
        let millis = (decayed.round() as u64).max(self.min_interval_ms);
        Duration::from_millis(millis)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(ConfigError::DecayFactor {
                value: self.decay_factor,
            });
        }
        if self.min_interval_ms == 0 || self.min_interval_ms > self.base_interval_ms {
            return Err(ConfigError::Interval {
                base_ms: self.base_interval_ms,
                min_ms: self.min_interval_ms,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board {name} must be within 4..=64, got {value}")]
    Dimension { name: &'static str, value: usize },
    #[display("gravity decay factor must be within (0, 1], got {value}")]
    DecayFactor { value: f64 },
    #[display("gravity intervals must satisfy 0 < min ({min_ms}ms) <= base ({base_ms}ms)")]
    Interval { base_ms: u64, min_ms: u64 },
}
