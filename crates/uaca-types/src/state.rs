// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — UACA State Model
// ─────────────────────────────────────────────────────────────────────
//! Value types for one layer's tick: the I/C/H axis triple, its phase,
//! anomaly marker, witness signature, and the snapshot projections the
//! temporal buffers hold.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const AXIS_MIN: f64 = 0.0;
pub const AXIS_MAX: f64 = 100.0;

/// Signature carried by every layer before its first tick.
pub const INITIAL_SIGNATURE: &str = "INIT_STATE_OK:0x000000:C0000";

/// Clamp an axis value to [0, 100], mapping NaN to 0 and Inf to nearest bound.
#[inline]
pub fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_axis: NaN detected, clamping to {AXIS_MIN:.1}");
        return AXIS_MIN;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { AXIS_MAX } else { AXIS_MIN };
        log::warn!("clamp_axis: Inf detected, clamping to {boundary:.1}");
        return boundary;
    }
    value.clamp(AXIS_MIN, AXIS_MAX)
}

/// Information / Complexity / Coherence triple, each in [0, 100].
///
/// Deserialized values are clamped like `AxisState::new`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAxisState")]
pub struct AxisState {
    #[serde(rename = "I")]
    pub information: f64,
    #[serde(rename = "C")]
    pub complexity: f64,
    /// Coherence, the axis governance watches.
    #[serde(rename = "H")]
    pub coherence: f64,
}

impl AxisState {
    pub fn new(information: f64, complexity: f64, coherence: f64) -> Self {
        Self {
            information: clamp_axis(information),
            complexity: clamp_axis(complexity),
            coherence: clamp_axis(coherence),
        }
    }

    pub fn is_bounded(&self) -> bool {
        [self.information, self.complexity, self.coherence]
            .iter()
            .all(|v| (AXIS_MIN..=AXIS_MAX).contains(v))
    }
}

#[derive(Deserialize)]
struct RawAxisState {
    #[serde(rename = "I")]
    information: f64,
    #[serde(rename = "C")]
    complexity: f64,
    #[serde(rename = "H")]
    coherence: f64,
}

impl From<RawAxisState> for AxisState {
    fn from(raw: RawAxisState) -> Self {
        Self::new(raw.information, raw.complexity, raw.coherence)
    }
}

/// Qualitative cognitive mode governing how a layer's axes move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Ordering: coherence rises, complexity falls.
    Apollonian,
    /// Dissolving: complexity and information rise, coherence falls.
    Dionysian,
    /// Synthesizing: information and complexity fold into coherence.
    Hegelian,
}

impl Phase {
    /// Cyclic order used by the periodic phase advance.
    pub const CYCLE: [Phase; 3] = [Phase::Apollonian, Phase::Dionysian, Phase::Hegelian];

    /// The phase after this one in the cycle.
    pub fn next(self) -> Phase {
        match self {
            Phase::Apollonian => Phase::Dionysian,
            Phase::Dionysian => Phase::Hegelian,
            Phase::Hegelian => Phase::Apollonian,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Apollonian => "Apollonian",
            Phase::Dionysian => "Dionysian",
            Phase::Hegelian => "Hegelian",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Phase> {
        Self::CYCLE
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping of the nine layers into three councils of three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Council {
    Strategy,
    Execution,
    Reaction,
}

impl Council {
    pub fn as_str(self) -> &'static str {
        match self {
            Council::Strategy => "Strategy",
            Council::Execution => "Execution",
            Council::Reaction => "Reaction",
        }
    }
}

impl fmt::Display for Council {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tick anomaly marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// State was pinned by an external agent; governance holds it.
    Forced,
    /// Candidate coherence fell below the critical threshold.
    CoherenceCritical { measured: f64, threshold: f64 },
}

impl Anomaly {
    pub fn is_forced(&self) -> bool {
        matches!(self, Anomaly::Forced)
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::Forced => f.write_str("FORCED_BY_EXTERNAL_AGENT"),
            Anomaly::CoherenceCritical {
                measured,
                threshold,
            } => write!(f, "H-AXIS CRITICAL: {measured:.0} < {threshold}"),
        }
    }
}

/// Partial axis overwrite. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisOverride {
    #[serde(rename = "I", default, skip_serializing_if = "Option::is_none")]
    pub information: Option<f64>,
    #[serde(rename = "C", default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<f64>,
    #[serde(rename = "H", default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<f64>,
}

impl AxisOverride {
    pub fn is_empty(&self) -> bool {
        self.information.is_none() && self.complexity.is_none() && self.coherence.is_none()
    }

    /// Overwrite the provided axes of `state`, clamping each.
    pub fn apply(&self, state: AxisState) -> AxisState {
        AxisState {
            information: self.information.map_or(state.information, clamp_axis),
            complexity: self.complexity.map_or(state.complexity, clamp_axis),
            coherence: self.coherence.map_or(state.coherence, clamp_axis),
        }
    }
}

/// Minimal per-layer projection held in temporal snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub id: u8,
    pub state: AxisState,
    pub phase: Phase,
}

/// The whole layer set at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalSnapshot {
    pub tick: u64,
    pub layers: Vec<LayerSnapshot>,
}

impl TemporalSnapshot {
    pub fn layer(&self, id: u8) -> Option<&LayerSnapshot> {
        self.layers.iter().find(|l| l.id == id)
    }
}

/// One tick's outcome for one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLogEntry {
    pub tick: u64,
    /// Candidate state before governance.
    pub predicted: AxisState,
    /// Recorded state after any dampening.
    pub state: AxisState,
    pub phase: Phase,
    pub anomaly: Option<Anomaly>,
    pub signature: String,
}

/// Live record of one of the nine layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub id: u8,
    pub name: String,
    pub council: Council,
    pub state: AxisState,
    pub phase: Phase,
    pub anomaly: Option<Anomaly>,
    pub signature: String,
    /// Tick results, newest first.
    pub history: VecDeque<TickLogEntry>,
}

impl LayerRecord {
    pub fn new(id: u8, name: &str, council: Council, state: AxisState) -> Self {
        Self {
            id,
            name: format!("Layer {id}: {name}"),
            council,
            state,
            phase: Phase::Apollonian,
            anomaly: None,
            signature: INITIAL_SIGNATURE.to_string(),
            history: VecDeque::new(),
        }
    }

    pub fn is_forced(&self) -> bool {
        self.anomaly.as_ref().is_some_and(Anomaly::is_forced)
    }

    pub fn snapshot(&self) -> LayerSnapshot {
        LayerSnapshot {
            id: self.id,
            state: self.state,
            phase: self.phase,
        }
    }

    /// Adopt a tick result as live state and prepend it to history,
    /// dropping the oldest entries beyond `cap`.
    pub fn commit(&mut self, entry: TickLogEntry, cap: usize) {
        self.state = entry.state;
        self.phase = entry.phase;
        self.anomaly = entry.anomaly.clone();
        self.signature = entry.signature.clone();
        self.history.push_front(entry);
        self.history.truncate(cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tick: u64) -> TickLogEntry {
        let state = AxisState::new(50.0, 50.0, 50.0);
        TickLogEntry {
            tick,
            predicted: state,
            state,
            phase: Phase::Hegelian,
            anomaly: None,
            signature: format!("STATE_OK:0x323232:C{tick:04}"),
        }
    }

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_axis(f64::NAN), 0.0);
    }

    #[test]
    fn test_clamp_infinities() {
        assert_eq!(clamp_axis(f64::INFINITY), 100.0);
        assert_eq!(clamp_axis(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp_axis(150.0), 100.0);
        assert_eq!(clamp_axis(-3.0), 0.0);
        assert_eq!(clamp_axis(42.5), 42.5);
    }

    #[test]
    fn test_axis_state_new_clamps() {
        let s = AxisState::new(120.0, -5.0, f64::NAN);
        assert_eq!(s, AxisState::new(100.0, 0.0, 0.0));
        assert!(s.is_bounded());
    }

    #[test]
    fn test_axis_state_deserialize_clamps() {
        let state: AxisState =
            serde_json::from_str(r#"{"I": 150.0, "C": -20.0, "H": 42.5}"#).unwrap();
        assert_eq!(state, AxisState::new(100.0, 0.0, 42.5));
        assert!(state.is_bounded());

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains(r#""I":100.0"#));
    }

    #[test]
    fn test_phase_cycle() {
        assert_eq!(Phase::Apollonian.next(), Phase::Dionysian);
        assert_eq!(Phase::Dionysian.next(), Phase::Hegelian);
        assert_eq!(Phase::Hegelian.next(), Phase::Apollonian);
    }

    #[test]
    fn test_phase_from_name() {
        assert_eq!(Phase::from_name("dionysian"), Some(Phase::Dionysian));
        assert_eq!(Phase::from_name(" Hegelian "), Some(Phase::Hegelian));
        assert_eq!(Phase::from_name("Stoic"), None);
    }

    #[test]
    fn test_anomaly_display() {
        assert_eq!(Anomaly::Forced.to_string(), "FORCED_BY_EXTERNAL_AGENT");
        let critical = Anomaly::CoherenceCritical {
            measured: 12.4,
            threshold: 20.0,
        };
        assert_eq!(critical.to_string(), "H-AXIS CRITICAL: 12 < 20");
    }

    #[test]
    fn test_override_partial() {
        let base = AxisState::new(10.0, 20.0, 30.0);
        let ov = AxisOverride {
            information: Some(150.0),
            ..Default::default()
        };
        assert_eq!(ov.apply(base), AxisState::new(100.0, 20.0, 30.0));
        assert!(AxisOverride::default().is_empty());
        assert!(!ov.is_empty());
    }

    #[test]
    fn test_override_json_keys() {
        let ov: AxisOverride = serde_json::from_str(r#"{"H": 5}"#).unwrap();
        assert_eq!(ov.coherence, Some(5.0));
        assert!(ov.information.is_none());
    }

    #[test]
    fn test_layer_record_initial() {
        let layer = LayerRecord::new(9, "Meta-strategic", Council::Strategy, AxisState::new(60.0, 50.0, 80.0));
        assert_eq!(layer.name, "Layer 9: Meta-strategic");
        assert_eq!(layer.phase, Phase::Apollonian);
        assert_eq!(layer.signature, INITIAL_SIGNATURE);
        assert!(layer.history.is_empty());
        assert!(!layer.is_forced());
    }

    #[test]
    fn test_commit_newest_first_and_capped() {
        let mut layer = LayerRecord::new(1, "Core/Autonomic", Council::Reaction, AxisState::new(1.0, 2.0, 3.0));
        for tick in 1..=5 {
            layer.commit(entry(tick), 3);
        }
        assert_eq!(layer.history.len(), 3);
        assert_eq!(layer.history[0].tick, 5);
        assert_eq!(layer.history[2].tick, 3);
        assert_eq!(layer.phase, Phase::Hegelian);
        assert_eq!(layer.signature, "STATE_OK:0x323232:C0005");
    }

    #[test]
    fn test_snapshot_lookup() {
        let snap = TemporalSnapshot {
            tick: 4,
            layers: vec![LayerSnapshot {
                id: 3,
                state: AxisState::new(1.0, 1.0, 1.0),
                phase: Phase::Apollonian,
            }],
        };
        assert!(snap.layer(3).is_some());
        assert!(snap.layer(4).is_none());
    }
}
