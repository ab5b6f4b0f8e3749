// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — UACA Engine Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! UACA temporal engine: nine layers, three axes, three phases.

pub mod config;
pub mod error;
pub mod persona;
pub mod state;

pub use config::{EngineConfig, MAX_BUFFER_CAP, MAX_TICK_PERIOD_MS};
pub use error::{UacaError, UacaResult};
pub use persona::{default_roster, Persona, DEFAULT_PERSONAS};
pub use state::{
    clamp_axis, Anomaly, AxisOverride, AxisState, Council, LayerRecord, LayerSnapshot, Phase,
    TemporalSnapshot, TickLogEntry, AXIS_MAX, AXIS_MIN, INITIAL_SIGNATURE,
};
