// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — CADM Temporal Buffers
// ─────────────────────────────────────────────────────────────────────
//! Whole-system snapshots at past and predicted future ticks.
//!
//! - `PastBuffer`: bounded ring, newest first, oldest evicted first.
//! - `FutureBuffer`: replaced wholesale by `project_future` after every
//!   real tick; it is a projection, never patched in place.
//!
//! The projection replays the phase and state rules only. Governance is
//! not modelled, so projected coherence may sit below the critical
//! threshold where the live engine would dampen.

use std::collections::VecDeque;

use uaca_types::{LayerRecord, LayerSnapshot, Phase, TemporalSnapshot, MAX_BUFFER_CAP};

use crate::entropy::EntropySource;
use crate::rules::{next_phase, potential_state, PhaseRules};

/// Snapshot of the live layer set at `tick`.
pub fn capture(tick: u64, layers: &[LayerRecord]) -> TemporalSnapshot {
    TemporalSnapshot {
        tick,
        layers: layers.iter().map(LayerRecord::snapshot).collect(),
    }
}

/// Bounded history of whole-system snapshots, newest first.
#[derive(Debug, Clone)]
pub struct PastBuffer {
    cap: usize,
    snapshots: VecDeque<TemporalSnapshot>,
}

impl PastBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            snapshots: VecDeque::with_capacity(cap.min(MAX_BUFFER_CAP) + 1),
        }
    }

    pub fn record(&mut self, snapshot: TemporalSnapshot) {
        self.snapshots.push_front(snapshot);
        self.snapshots.truncate(self.cap);
    }

    pub fn find(&self, tick: u64) -> Option<&TemporalSnapshot> {
        self.snapshots.iter().find(|s| s.tick == tick)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &TemporalSnapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

/// Predicted snapshots in ascending tick order.
#[derive(Debug, Clone, Default)]
pub struct FutureBuffer {
    snapshots: Vec<TemporalSnapshot>,
}

impl FutureBuffer {
    pub fn replace(&mut self, snapshots: Vec<TemporalSnapshot>) {
        self.snapshots = snapshots;
    }

    pub fn find(&self, tick: u64) -> Option<&TemporalSnapshot> {
        self.snapshots.iter().find(|s| s.tick == tick)
    }

    pub fn as_slice(&self) -> &[TemporalSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Project `horizon` ticks ahead of `from_tick` without touching `layers`.
///
/// Each step feeds the previous step's projected id/state/phase back in.
/// Returns snapshots for ticks `from_tick + 1 ..= from_tick + horizon`.
pub fn project_future(
    layers: &[LayerRecord],
    from_tick: u64,
    horizon: usize,
    preferred: Option<Phase>,
    rules: &PhaseRules,
    entropy: &mut dyn EntropySource,
) -> Vec<TemporalSnapshot> {
    let mut current: Vec<LayerSnapshot> = layers.iter().map(LayerRecord::snapshot).collect();
    let mut predictions = Vec::with_capacity(horizon.min(MAX_BUFFER_CAP));

    for tick in (from_tick + 1..).take(horizon) {
        let mut next = Vec::with_capacity(current.len());
        for layer in &current {
            let phase = next_phase(layer.phase, tick, preferred, rules, &mut *entropy);
            let state = potential_state(layer.state, layer.id, phase, tick, &mut *entropy);
            next.push(LayerSnapshot {
                id: layer.id,
                state,
                phase,
            });
        }
        predictions.push(TemporalSnapshot {
            tick,
            layers: next.clone(),
        });
        current = next;
    }

    predictions
}
