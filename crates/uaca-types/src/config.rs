// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — UACA Engine Configuration
// ─────────────────────────────────────────────────────────────────────

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{UacaError, UacaResult};
use crate::state::{AXIS_MAX, AXIS_MIN};

/// Upper bound for `history_cap` and `temporal_cap`.
pub const MAX_BUFFER_CAP: usize = 10_000;
/// Upper bound for `tick_period_ms`: one day.
pub const MAX_TICK_PERIOD_MS: u64 = 86_400_000;

/// Runtime configuration for the temporal engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Period of the tick timer in milliseconds.
    /// Default: 900 (three 300 ms cycle-resonance periods).
    pub tick_period_ms: u64,

    /// Coherence below this value flags the tick as anomalous.
    /// Default: 20.
    pub critical_coherence: f64,

    /// Per-layer tick history length (newest first).
    /// Default: 20.
    pub history_cap: usize,

    /// Size of both the past and the future snapshot buffers.
    /// Default: 10.
    pub temporal_cap: usize,

    /// Phases advance cyclically on every tick divisible by this.
    /// Default: 5.
    pub phase_cycle_every: u64,

    /// Chance that the active persona's preferred phase overrides the cycle.
    /// Default: 0.25.
    pub persona_bias_probability: f64,

    /// Seed for the engine's entropy source. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 900,
            critical_coherence: 20.0,
            history_cap: 20,
            temporal_cap: 10,
            phase_cycle_every: 5,
            persona_bias_probability: 0.25,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> UacaResult<()> {
        if !(1..=MAX_TICK_PERIOD_MS).contains(&self.tick_period_ms) {
            return Err(UacaError::Config(format!(
                "tick_period_ms must be in [1, {MAX_TICK_PERIOD_MS}], got {}",
                self.tick_period_ms
            )));
        }
        if !(AXIS_MIN..=AXIS_MAX).contains(&self.critical_coherence) {
            return Err(UacaError::Config(format!(
                "critical_coherence must be in [{AXIS_MIN}, {AXIS_MAX}], got {}",
                self.critical_coherence
            )));
        }
        if !(1..=MAX_BUFFER_CAP).contains(&self.history_cap) {
            return Err(UacaError::Config(format!(
                "history_cap must be in [1, {MAX_BUFFER_CAP}], got {}",
                self.history_cap
            )));
        }
        if !(1..=MAX_BUFFER_CAP).contains(&self.temporal_cap) {
            return Err(UacaError::Config(format!(
                "temporal_cap must be in [1, {MAX_BUFFER_CAP}], got {}",
                self.temporal_cap
            )));
        }
        if self.phase_cycle_every < 1 {
            return Err(UacaError::Config(format!(
                "phase_cycle_every must be >= 1, got {}",
                self.phase_cycle_every
            )));
        }
        if !(0.0..=1.0).contains(&self.persona_bias_probability) {
            return Err(UacaError::Config(format!(
                "persona_bias_probability must be in [0, 1], got {}",
                self.persona_bias_probability
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> UacaResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| UacaError::Config(format!("JSON parse error: {e}")))
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = EngineConfig {
            tick_period_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(UacaError::Config(_))));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = EngineConfig {
            critical_coherence: 120.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("critical_coherence"));
    }

    #[test]
    fn test_zero_caps_rejected() {
        let history = EngineConfig {
            history_cap: 0,
            ..Default::default()
        };
        let temporal = EngineConfig {
            temporal_cap: 0,
            ..Default::default()
        };
        assert!(history.validate().is_err());
        assert!(temporal.validate().is_err());
    }

    #[test]
    fn test_oversized_caps_rejected() {
        let temporal = EngineConfig {
            temporal_cap: usize::MAX,
            ..Default::default()
        };
        let history = EngineConfig {
            history_cap: MAX_BUFFER_CAP + 1,
            ..Default::default()
        };
        let at_limit = EngineConfig {
            temporal_cap: MAX_BUFFER_CAP,
            history_cap: MAX_BUFFER_CAP,
            ..Default::default()
        };
        assert!(temporal.validate().unwrap_err().to_string().contains("temporal_cap"));
        assert!(history.validate().unwrap_err().to_string().contains("history_cap"));
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_oversized_period_rejected() {
        let config = EngineConfig {
            tick_period_ms: u64::MAX,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tick_period_ms"));
        let one_day = EngineConfig {
            tick_period_ms: MAX_TICK_PERIOD_MS,
            ..Default::default()
        };
        assert!(one_day.validate().is_ok());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let config = EngineConfig {
            persona_bias_probability: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"tick_period_ms": 100, "seed": 7}"#).unwrap();
        assert_eq!(config.tick_period_ms, 100);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.history_cap, 20);
        assert_eq!(config.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn test_from_json_garbage() {
        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }
}
