// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Tool Envelope Extraction & Dispatch
// ─────────────────────────────────────────────────────────────────────
//! Pulls the fenced JSON envelope out of an assistant reply, validates
//! the tool call and applies it to a `SimulationContext`.
//!
//! Rejection is strict: an unknown tool name is treated like malformed
//! arguments. The reply becomes `ANOMALY_REPLY` and any `text_response`
//! in the envelope is discarded, rather than logging the unknown name
//! and echoing the assistant's text as if the action had happened.

use serde::Deserialize;
use serde_json::Value;

use uaca_core::SimulationContext;
use uaca_types::{TemporalSnapshot, UacaError, UacaResult};

use crate::call::ToolCall;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

pub const DEFAULT_ACK: &str = "Action performed.";
pub const ANOMALY_REPLY: &str = "I attempted an action but encountered an internal anomaly.";

/// Body of the fenced block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolEnvelope {
    #[serde(default)]
    pub tool_call: Option<Value>,
    #[serde(default)]
    pub text_response: Option<String>,
}

/// What a dispatched call did to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Applied,
    /// Referenced a layer that does not exist; nothing changed.
    Ignored,
    Temporal(Option<TemporalSnapshot>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolReply {
    /// Text to show the user.
    pub text: String,
    /// `None` when no call was dispatched.
    pub outcome: Option<ToolOutcome>,
}

impl ToolReply {
    fn passthrough(text: &str) -> Self {
        Self {
            text: text.to_string(),
            outcome: None,
        }
    }
}

/// Trimmed contents of the first ```` ```json ```` fence, if any.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let rest = &text[start..];
    let end = rest.find(FENCE_CLOSE)?;
    let body = rest[..end].trim();
    (!body.is_empty()).then_some(body)
}

/// `Ok(None)` when the text carries no block; `Err` when the block is not
/// a JSON envelope.
pub fn extract_envelope(text: &str) -> UacaResult<Option<ToolEnvelope>> {
    let Some(body) = extract_json_block(text) else {
        return Ok(None);
    };
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| UacaError::ToolCall(format!("malformed tool envelope: {e}")))
}

pub fn dispatch(ctx: &mut SimulationContext, call: &ToolCall) -> ToolOutcome {
    let applied = |hit: bool| {
        if hit {
            ToolOutcome::Applied
        } else {
            ToolOutcome::Ignored
        }
    };
    match call {
        ToolCall::TriggerEthicalCrisis { layer_id } => applied(ctx.force_crisis(*layer_id)),
        ToolCall::InduceSystemWideCoherence => {
            ctx.induce_coherence();
            ToolOutcome::Applied
        }
        ToolCall::ForceStateTransition {
            layer_id,
            axes,
            phase,
        } => applied(ctx.force_state(*layer_id, *axes, *phase)),
        ToolCall::QueryTemporalState { cycle_offset } => {
            let snapshot = ctx.query_temporal(*cycle_offset).cloned();
            log::info!(
                "temporal query at offset {cycle_offset}: {}",
                if snapshot.is_some() { "hit" } else { "out of window" }
            );
            ToolOutcome::Temporal(snapshot)
        }
    }
}

/// Run an assistant reply against the engine and produce the user-facing
/// text.
pub fn handle_response(ctx: &mut SimulationContext, text: &str) -> ToolReply {
    let envelope = match extract_envelope(text) {
        Ok(Some(envelope)) => envelope,
        Ok(None) => return ToolReply::passthrough(text),
        Err(e) => return anomaly(&e),
    };
    let Some(raw) = envelope.tool_call.as_ref() else {
        return ToolReply::passthrough(text);
    };
    let call = match ToolCall::from_json(raw) {
        Ok(call) => call,
        Err(e) => return anomaly(&e),
    };

    let outcome = dispatch(ctx, &call);
    if outcome == ToolOutcome::Ignored {
        log::warn!("{}: no such layer, call ignored", call.name());
    }
    ToolReply {
        text: envelope
            .text_response
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_ACK.to_string()),
        outcome: Some(outcome),
    }
}

fn anomaly(err: &UacaError) -> ToolReply {
    log::error!("tool call rejected: {err}");
    ToolReply {
        text: ANOMALY_REPLY.to_string(),
        outcome: None,
    }
}
