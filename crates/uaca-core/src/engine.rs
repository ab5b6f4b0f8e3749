// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — UACA Simulation Context
// ─────────────────────────────────────────────────────────────────────
//! The single owned aggregate holding the live layer table, clock,
//! persona and temporal buffers. Every tick and every mutation goes
//! through its methods; `Scheduler` only decides *when* `tick()` runs.
//!
//! Per tick, for each layer:
//!   phase rule → state rule (skipped if forced) → governance →
//!   witness signature → history commit
//! followed by a full recomputation of the future buffer.

use uaca_types::{
    default_roster, Anomaly, AxisOverride, AxisState, EngineConfig, LayerRecord, Persona, Phase,
    TemporalSnapshot, TickLogEntry, UacaResult,
};

use crate::entropy::{EntropySource, SeededEntropy};
use crate::governance::Governor;
use crate::params::{
    INITIAL_COHERENCE, INITIAL_COMPLEXITY, INITIAL_INFORMATION, LAYER_TABLE, META_LAYER_ID,
};
use crate::rules::{next_phase, potential_state, PhaseRules};
use crate::temporal::{capture, project_future, FutureBuffer, PastBuffer};
use crate::witness::witness_signature;

/// Forced crises raise information and complexity by these amounts.
const CRISIS_INFORMATION_SURGE: f64 = 25.0;
const CRISIS_COMPLEXITY_SURGE: f64 = 40.0;
/// Forced coherence lands this far (plus up to the same again) below threshold.
const CRISIS_COHERENCE_MARGIN: f64 = 5.0;

/// Live state of one running engine.
pub struct SimulationContext {
    config: EngineConfig,
    rules: PhaseRules,
    governor: Governor,
    entropy: Box<dyn EntropySource>,
    layers: Vec<LayerRecord>,
    tick: u64,
    past: PastBuffer,
    future: FutureBuffer,
    personas: Vec<Persona>,
    active_persona: usize,
}

impl SimulationContext {
    /// Build an engine drawing from a seeded (or OS-seeded) ChaCha source.
    pub fn new(config: EngineConfig) -> UacaResult<Self> {
        let entropy = Box::new(SeededEntropy::from_config(&config));
        Self::with_entropy(config, entropy)
    }

    /// Build an engine drawing from `entropy`; initial axes use it too.
    pub fn with_entropy(
        config: EngineConfig,
        mut entropy: Box<dyn EntropySource>,
    ) -> UacaResult<Self> {
        config.validate()?;

        let mut draw = |(base, spread): (f64, f64)| base + entropy.next_unit() * spread;
        let layers = LAYER_TABLE
            .iter()
            .map(|&(id, name, council)| {
                let state = AxisState::new(
                    draw(INITIAL_INFORMATION),
                    draw(INITIAL_COMPLEXITY),
                    draw(INITIAL_COHERENCE),
                );
                LayerRecord::new(id, name, council, state)
            })
            .collect();

        Ok(Self {
            rules: PhaseRules::from_config(&config),
            governor: Governor::from_config(&config),
            past: PastBuffer::new(config.temporal_cap),
            future: FutureBuffer::default(),
            layers,
            tick: 0,
            personas: default_roster(),
            active_persona: 0,
            entropy,
            config,
        })
    }

    /// Advance the clock by one and update every layer.
    pub fn tick(&mut self) {
        self.tick += 1;
        let tick = self.tick;

        // The pre-update state belongs to the previous cycle; cycle 0 is never logged.
        let previous = tick - 1;
        if previous >= 1 {
            self.past.record(capture(previous, &self.layers));
        }

        let preferred = self.persona().preferred_phase;
        let history_cap = self.config.history_cap;
        let mut anomalies = 0usize;

        for layer in self.layers.iter_mut() {
            let phase = next_phase(layer.phase, tick, preferred, &self.rules, self.entropy.as_mut());
            let (held, id) = (layer.state, layer.id);
            let verdict = self.governor.review(
                layer.anomaly.as_ref(),
                held,
                self.entropy.as_mut(),
                |entropy| potential_state(held, id, phase, tick, entropy),
            );
            if verdict.anomaly.is_some() {
                anomalies += 1;
            }

            let signature = witness_signature(&verdict.state, verdict.anomaly.as_ref(), tick);
            layer.commit(
                TickLogEntry {
                    tick,
                    predicted: verdict.predicted,
                    state: verdict.state,
                    phase,
                    anomaly: verdict.anomaly,
                    signature,
                },
                history_cap,
            );
        }

        let horizon = self.config.temporal_cap;
        let predictions = project_future(
            &self.layers,
            tick,
            horizon,
            preferred,
            &self.rules,
            self.entropy.as_mut(),
        );
        self.future.replace(predictions);

        log::debug!("tick {tick}: {anomalies} anomalous layer(s)");
    }

    // ── Mutation API ──────────────────────────────────────────────

    /// Pin a layer in a forced crisis: I and C surge, H drops just under
    /// the critical threshold, phase turns Dionysian.
    ///
    /// Returns `false` (and changes nothing) for an unknown id.
    pub fn force_crisis(&mut self, layer_id: u8) -> bool {
        if self.layer(layer_id).is_none() {
            return false;
        }
        let threshold = self.governor.critical_coherence();
        let jitter = self.entropy.next_unit() * CRISIS_COHERENCE_MARGIN;
        let Some(layer) = self.layer_mut(layer_id) else {
            return false;
        };

        layer.state = AxisState::new(
            layer.state.information + CRISIS_INFORMATION_SURGE,
            layer.state.complexity + CRISIS_COMPLEXITY_SURGE,
            threshold - (CRISIS_COHERENCE_MARGIN + jitter),
        );
        layer.phase = Phase::Dionysian;
        layer.anomaly = Some(Anomaly::Forced);
        log::warn!("{}: crisis forced by external agent", layer.name);
        true
    }

    /// Put every layer into the Apollonian phase. Axes are untouched.
    pub fn induce_coherence(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.phase = Phase::Apollonian;
        }
        log::info!("system-wide coherence induced");
    }

    /// Overwrite the provided axes (clamped) and, if given, the phase.
    ///
    /// Returns `false` (and changes nothing) for an unknown id.
    pub fn force_state(&mut self, layer_id: u8, axes: AxisOverride, phase: Option<Phase>) -> bool {
        let Some(layer) = self.layer_mut(layer_id) else {
            return false;
        };
        layer.state = axes.apply(layer.state);
        if let Some(phase) = phase {
            layer.phase = phase;
        }
        true
    }

    /// Snapshot `offset` ticks from now: past buffer for negative offsets,
    /// future buffer for positive ones. `None` for 0 or out-of-window.
    pub fn query_temporal(&self, offset: i64) -> Option<&TemporalSnapshot> {
        let target = i64::try_from(self.tick).ok()?.checked_add(offset)?;
        let target = u64::try_from(target).ok()?;
        match offset {
            o if o < 0 => self.past.find(target),
            o if o > 0 => self.future.find(target),
            _ => None,
        }
    }

    // ── Persona ───────────────────────────────────────────────────

    pub fn persona(&self) -> &Persona {
        &self.personas[self.active_persona]
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    /// Activate a persona by name. Unknown names are ignored.
    pub fn set_persona(&mut self, name: &str) -> bool {
        match self.personas.iter().position(|p| p.name == name) {
            Some(index) => {
                self.active_persona = index;
                log::info!("persona set to {name}");
                true
            }
            None => false,
        }
    }

    // ── Read surface ──────────────────────────────────────────────

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn layers(&self) -> &[LayerRecord] {
        &self.layers
    }

    pub fn layer(&self, layer_id: u8) -> Option<&LayerRecord> {
        self.layers.iter().find(|l| l.id == layer_id)
    }

    fn layer_mut(&mut self, layer_id: u8) -> Option<&mut LayerRecord> {
        self.layers.iter_mut().find(|l| l.id == layer_id)
    }

    /// The meta-strategic layer (L9).
    pub fn meta_layer(&self) -> Option<&LayerRecord> {
        self.layer(META_LAYER_ID)
    }

    pub fn past_snapshots(&self) -> &PastBuffer {
        &self.past
    }

    pub fn future_snapshots(&self) -> &FutureBuffer {
        &self.future
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
