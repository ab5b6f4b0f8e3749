// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Canonical Layer Table
// ─────────────────────────────────────────────────────────────────────
//! The nine-layer hierarchy, its councils, and the fixed execution
//! flow ring used by the step indicator.

use serde::Serialize;

use uaca_types::Council;

pub const N_LAYERS: usize = 9;

/// Id of the meta-strategic layer the assistant reports on.
pub const META_LAYER_ID: u8 = 9;

/// (id, name, council), top of the hierarchy first.
pub const LAYER_TABLE: [(u8, &str, Council); N_LAYERS] = [
    (9, "Meta-strategic", Council::Strategy),
    (8, "Strategic", Council::Strategy),
    (7, "Tactical", Council::Strategy),
    (6, "Operational", Council::Execution),
    (5, "Executive", Council::Execution),
    (4, "Analytical", Council::Execution),
    (3, "Reactive", Council::Reaction),
    (2, "Reflexive", Council::Reaction),
    (1, "Core/Autonomic", Council::Reaction),
];

/// Initial axis ranges as (base, spread): value = base + spread * r.
pub const INITIAL_INFORMATION: (f64, f64) = (50.0, 20.0);
pub const INITIAL_COMPLEXITY: (f64, f64) = (40.0, 20.0);
pub const INITIAL_COHERENCE: (f64, f64) = (70.0, 20.0);

/// One stage of the per-tick execution flow shown by the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionStep {
    pub id: usize,
    pub name: &'static str,
}

const fn step(id: usize, name: &'static str) -> ExecutionStep {
    ExecutionStep { id, name }
}

pub const EXECUTION_FLOW: [ExecutionStep; 11] = [
    step(1, "INPUT arrives"),
    step(2, "Layers receive input"),
    step(3, "Calculate AOD state"),
    step(4, "TCE determines phase"),
    step(5, "CADM queries knowledge"),
    step(6, "CODES encodes info"),
    step(7, "AOD entropy forging"),
    step(8, "TWP generates signature"),
    step(9, "C_E Governance check"),
    step(10, "State Commit/Dampen"),
    step(11, "OUTPUT generated"),
];

pub fn execution_step(id: usize) -> Option<ExecutionStep> {
    EXECUTION_FLOW.iter().copied().find(|s| s.id == id)
}
