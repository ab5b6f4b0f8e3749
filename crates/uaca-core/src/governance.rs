// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — C_E Governance (Anomaly + Emergency Dampening)
// ─────────────────────────────────────────────────────────────────────
//! Coherence governance: the engine's only self-correcting mechanism.
//!
//! Two anomaly kinds:
//! - **Forced**: the layer was pinned by an external agent. The candidate
//!   computation is skipped, the state is held as-is and the marker
//!   persists across ticks.
//! - **Coherence critical**: the candidate's H axis fell below the
//!   critical threshold. The candidate is replaced by a dampened state.
//!
//! Governance never rejects a tick and never fails; every verdict carries
//! a clamped state.

use uaca_types::{Anomaly, AxisState, EngineConfig};

use crate::entropy::EntropySource;

pub const DAMPING_COHERENCE_BOOST: f64 = 40.0;
pub const DAMPING_COMPLEXITY_CUT: f64 = 30.0;
pub const DAMPING_INFORMATION_CUT: f64 = 15.0;
/// Upper bound of the random extra applied on top of each fixed term.
pub const DAMPING_JITTER: f64 = 10.0;

/// Outcome of governing one layer for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Candidate state before governance.
    pub predicted: AxisState,
    /// State to record.
    pub state: AxisState,
    pub anomaly: Option<Anomaly>,
}

/// Emergency dampening: push coherence up, complexity and information down.
pub fn dampen(state: AxisState, entropy: &mut dyn EntropySource) -> AxisState {
    let coherence = state.coherence + DAMPING_COHERENCE_BOOST + entropy.next_unit() * DAMPING_JITTER;
    let complexity = state.complexity - DAMPING_COMPLEXITY_CUT - entropy.next_unit() * DAMPING_JITTER;
    let information = state.information - DAMPING_INFORMATION_CUT - entropy.next_unit() * DAMPING_JITTER;
    AxisState::new(information, complexity, coherence)
}

/// Coherence governor holding the critical threshold.
#[derive(Debug, Clone, Copy)]
pub struct Governor {
    critical_coherence: f64,
}

impl Default for Governor {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Governor {
    pub fn new(critical_coherence: f64) -> Self {
        Self { critical_coherence }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.critical_coherence)
    }

    pub fn critical_coherence(&self) -> f64 {
        self.critical_coherence
    }

    /// Threshold check on a candidate state.
    pub fn detect(&self, candidate: &AxisState) -> Option<Anomaly> {
        (candidate.coherence < self.critical_coherence).then(|| Anomaly::CoherenceCritical {
            measured: candidate.coherence,
            threshold: self.critical_coherence,
        })
    }

    /// Govern one layer's tick.
    ///
    /// `candidate` computes the rule-driven next state; it is not invoked
    /// (and draws no entropy) when the layer is forced.
    pub fn review<F>(
        &self,
        prior: Option<&Anomaly>,
        held: AxisState,
        entropy: &mut dyn EntropySource,
        candidate: F,
    ) -> Verdict
    where
        F: FnOnce(&mut dyn EntropySource) -> AxisState,
    {
        if prior.is_some_and(Anomaly::is_forced) {
            return Verdict {
                predicted: held,
                state: held,
                anomaly: Some(Anomaly::Forced),
            };
        }

        let predicted = candidate(&mut *entropy);
        match self.detect(&predicted) {
            Some(anomaly) => {
                let state = dampen(predicted, entropy);
                log::warn!(
                    "{anomaly}: dampening H {:.1} -> {:.1}",
                    predicted.coherence,
                    state.coherence
                );
                Verdict {
                    predicted,
                    state,
                    anomaly: Some(anomaly),
                }
            }
            None => Verdict {
                predicted,
                state: predicted,
                anomaly: None,
            },
        }
    }
}
