// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Tool Call Validation
// ─────────────────────────────────────────────────────────────────────
//! Typed form of the four assistant tools and their argument checks.
//!
//! Integer arguments accept JSON numbers or numeric strings and are
//! truncated toward zero, matching a lenient integer parse.

use serde::Serialize;
use serde_json::{Map, Value};

use uaca_types::{AxisOverride, Phase, UacaError, UacaResult};

pub const TRIGGER_ETHICAL_CRISIS: &str = "trigger_ethical_crisis";
pub const INDUCE_SYSTEM_WIDE_COHERENCE: &str = "induce_system_wide_coherence";
pub const FORCE_STATE_TRANSITION: &str = "force_state_transition";
pub const QUERY_TEMPORAL_STATE: &str = "query_temporal_state";

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    TriggerEthicalCrisis {
        layer_id: u8,
    },
    InduceSystemWideCoherence,
    ForceStateTransition {
        layer_id: u8,
        axes: AxisOverride,
        phase: Option<Phase>,
    },
    QueryTemporalState {
        cycle_offset: i64,
    },
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::TriggerEthicalCrisis { .. } => TRIGGER_ETHICAL_CRISIS,
            ToolCall::InduceSystemWideCoherence => INDUCE_SYSTEM_WIDE_COHERENCE,
            ToolCall::ForceStateTransition { .. } => FORCE_STATE_TRANSITION,
            ToolCall::QueryTemporalState { .. } => QUERY_TEMPORAL_STATE,
        }
    }

    /// Validate a `{"name": ..., "arguments": {...}}` object.
    pub fn from_json(value: &Value) -> UacaResult<Self> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| UacaError::ToolCall("missing tool name".to_string()))?;
        let empty = Map::new();
        let args = match value.get("arguments") {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(UacaError::ToolCall(format!(
                    "{name}: arguments must be an object, got {other}"
                )))
            }
        };

        match name {
            TRIGGER_ETHICAL_CRISIS => Ok(ToolCall::TriggerEthicalCrisis {
                layer_id: layer_id(name, args)?,
            }),
            INDUCE_SYSTEM_WIDE_COHERENCE => Ok(ToolCall::InduceSystemWideCoherence),
            FORCE_STATE_TRANSITION => Ok(ToolCall::ForceStateTransition {
                layer_id: layer_id(name, args)?,
                axes: AxisOverride {
                    information: axis(name, args, "I")?,
                    complexity: axis(name, args, "C")?,
                    coherence: axis(name, args, "H")?,
                },
                phase: phase(name, args)?,
            }),
            QUERY_TEMPORAL_STATE => {
                let raw = args.get("cycle_offset").ok_or_else(|| missing(name, "cycle_offset"))?;
                Ok(ToolCall::QueryTemporalState {
                    cycle_offset: integer(name, "cycle_offset", raw)?,
                })
            }
            other => Err(UacaError::UnknownTool(other.to_string())),
        }
    }
}

fn missing(tool: &str, field: &str) -> UacaError {
    UacaError::ToolCall(format!("{tool}: missing argument `{field}`"))
}

fn integer(tool: &str, field: &str, value: &Value) -> UacaResult<i64> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    };
    parsed.ok_or_else(|| {
        UacaError::ToolCall(format!("{tool}: `{field}` must be an integer, got {value}"))
    })
}

fn layer_id(tool: &str, args: &Map<String, Value>) -> UacaResult<u8> {
    let raw = args.get("layerId").ok_or_else(|| missing(tool, "layerId"))?;
    let id = integer(tool, "layerId", raw)?;
    u8::try_from(id)
        .map_err(|_| UacaError::ToolCall(format!("{tool}: `layerId` {id} is out of range")))
}

fn axis(tool: &str, args: &Map<String, Value>, key: &str) -> UacaResult<Option<f64>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(UacaError::ToolCall(format!(
            "{tool}: `{key}` must be a number, got {other}"
        ))),
    }
}

fn phase(tool: &str, args: &Map<String, Value>) -> UacaResult<Option<Phase>> {
    let raw = match args.get("phase").or_else(|| args.get("tcePhase")) {
        None | Some(Value::Null) => return Ok(None),
        Some(raw) => raw,
    };
    raw.as_str()
        .and_then(Phase::from_name)
        .map(Some)
        .ok_or_else(|| UacaError::ToolCall(format!("{tool}: unknown phase {raw}")))
}
