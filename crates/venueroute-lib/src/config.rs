//! Routing configuration shared by the CLI and the HTTP service.
//!
//! # Environment Variables
//!
//! - `VENUEROUTE_CROWD_PENALTY`: crowd penalty coefficient (default: `5.0`)

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Default multiplier applied to an edge's risk factor when avoiding crowds.
pub const DEFAULT_CROWD_PENALTY: f64 = 5.0;

/// Environment variable overriding [`RoutingConfig::crowd_penalty`].
pub const CROWD_PENALTY_ENV: &str = "VENUEROUTE_CROWD_PENALTY";

/// Tunables for the cost model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// With crowd avoidance on, an edge costs `distance * (1 + risk * crowd_penalty)`.
    #[serde(default = "default_crowd_penalty")]
    pub crowd_penalty: f64,
}

fn default_crowd_penalty() -> f64 {
    DEFAULT_CROWD_PENALTY
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            crowd_penalty: DEFAULT_CROWD_PENALTY,
        }
    }
}

impl RoutingConfig {
    /// Create a configuration with an explicit crowd penalty coefficient.
    pub fn with_crowd_penalty(crowd_penalty: f64) -> Result<Self> {
        Self { crowd_penalty }.validate()
    }

    /// Create configuration from environment variables.
    ///
    /// Unparseable values are logged and ignored; parsed values are still
    /// validated.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(CROWD_PENALTY_ENV) {
            match raw.trim().parse::<f64>() {
                Ok(value) => config.crowd_penalty = value,
                Err(_) => warn!(
                    variable = CROWD_PENALTY_ENV,
                    value = %raw,
                    "ignoring unparseable crowd penalty"
                ),
            }
        }
        config.validate()
    }

    /// The coefficient must be finite and strictly positive so that a higher
    /// risk factor always yields a strictly higher cost.
    pub fn validate(self) -> Result<Self> {
        if self.crowd_penalty.is_finite() && self.crowd_penalty > 0.0 {
            Ok(self)
        } else {
            Err(Error::InvalidCrowdPenalty {
                value: self.crowd_penalty,
            })
        }
    }
}
