// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Phase Transition + State Update Rules
// ─────────────────────────────────────────────────────────────────────
//! The two pure rules every tick (and every projected tick) applies:
//!
//!   phase'  = next_phase(phase, tick, persona bias)
//!   state'  = potential_state(state, phase')
//!
//! Randomness enters only through the `EntropySource` argument, so the
//! rules are deterministic for a deterministic source.

use uaca_types::{AxisState, EngineConfig, Phase};

use crate::entropy::EntropySource;

/// Apollonian: max coherence gain, max complexity loss, information drift span.
const ORDER_COHERENCE_GAIN: f64 = 15.0;
const ORDER_COMPLEXITY_LOSS: f64 = 10.0;
const ORDER_INFORMATION_DRIFT: f64 = 5.0;

/// Dionysian: max complexity gain, max information gain, max coherence loss.
const DISSOLVE_COMPLEXITY_GAIN: f64 = 20.0;
const DISSOLVE_INFORMATION_GAIN: f64 = 15.0;
const DISSOLVE_COHERENCE_LOSS: f64 = 25.0;

/// Hegelian: synthesis = (I + C) / SYNTHESIS_DIVISOR.
const SYNTHESIS_DIVISOR: f64 = 30.0;

/// Parameters of the phase transition rule.
#[derive(Debug, Clone, Copy)]
pub struct PhaseRules {
    /// Phases advance on ticks divisible by this.
    pub cycle_every: u64,
    /// Chance a persona's preferred phase wins the tick.
    pub bias_probability: f64,
}

impl Default for PhaseRules {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl PhaseRules {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            cycle_every: config.phase_cycle_every.max(1),
            bias_probability: config.persona_bias_probability,
        }
    }
}

/// Decide a layer's phase for `tick`.
///
/// A preferred phase costs one draw and wins with `bias_probability`.
/// Otherwise the phase advances cyclically on every `cycle_every`-th
/// tick and holds in between.
pub fn next_phase(
    current: Phase,
    tick: u64,
    preferred: Option<Phase>,
    rules: &PhaseRules,
    entropy: &mut dyn EntropySource,
) -> Phase {
    if let Some(phase) = preferred {
        if entropy.next_unit() < rules.bias_probability {
            return phase;
        }
    }
    if tick > 0 && tick % rules.cycle_every == 0 {
        return current.next();
    }
    current
}

/// Candidate axis state for a layer entering `phase`.
///
/// `layer_id` and `tick` do not influence the result yet; they are
/// threaded through for per-layer differentiation.
pub fn potential_state(
    current: AxisState,
    _layer_id: u8,
    phase: Phase,
    _tick: u64,
    entropy: &mut dyn EntropySource,
) -> AxisState {
    let AxisState {
        mut information,
        mut complexity,
        mut coherence,
    } = current;

    match phase {
        Phase::Apollonian => {
            coherence += entropy.next_unit() * ORDER_COHERENCE_GAIN;
            complexity -= entropy.next_unit() * ORDER_COMPLEXITY_LOSS;
            information += (entropy.next_unit() - 0.5) * ORDER_INFORMATION_DRIFT;
        }
        Phase::Dionysian => {
            complexity += entropy.next_unit() * DISSOLVE_COMPLEXITY_GAIN;
            information += entropy.next_unit() * DISSOLVE_INFORMATION_GAIN;
            coherence -= entropy.next_unit() * DISSOLVE_COHERENCE_LOSS;
        }
        Phase::Hegelian => {
            let synthesis = (information + complexity) / SYNTHESIS_DIVISOR;
            coherence += synthesis;
            information -= synthesis / 2.0;
            complexity -= synthesis / 2.0;
        }
    }

    AxisState::new(information, complexity, coherence)
}
