// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — UACA Temporal Engine Core
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Temporal simulation engine for the nine-layer UACA hierarchy.
//!
//! A tick advances the global clock, moves every layer through the
//! phase and state rules, lets C_E governance flag and dampen anomalies,
//! stamps a witness signature, and refreshes the past/future snapshot
//! buffers.
//!
//! # Invariants
//!
//! 1. **Axes stay bounded**: every I/C/H value is in [0, 100] after any
//!    tick, projection, or mutation.
//!
//! 2. **Forced layers are held**: a layer carrying the forced marker
//!    keeps its exact axis state through every tick, and the marker
//!    persists.
//!
//! 3. **Tick logic is timer-free**: `SimulationContext::tick()` is
//!    synchronous; `Scheduler` only decides when it runs.
//!
//! 4. **Randomness is injected**: every draw comes from the context's
//!    `EntropySource`, so a fixed source makes the engine deterministic.

pub mod engine;
pub mod entropy;
pub mod governance;
pub mod params;
pub mod rules;
pub mod scheduler;
pub mod temporal;
pub mod witness;

pub use engine::SimulationContext;
pub use entropy::{EntropySource, ExternalEntropy, FixedEntropy, SeededEntropy};
pub use governance::{Governor, Verdict};
pub use params::{ExecutionStep, EXECUTION_FLOW, LAYER_TABLE, N_LAYERS};
pub use rules::{next_phase, potential_state, PhaseRules};
pub use scheduler::{RunStatus, Scheduler};
pub use temporal::{project_future, FutureBuffer, PastBuffer};
pub use witness::witness_signature;
