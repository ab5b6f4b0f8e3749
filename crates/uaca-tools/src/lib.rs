// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — UACA Tool-Call Adapter
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Bridges an assistant's free-text replies to the engine's typed
//! mutation API.
//!
//! The assistant embeds one fenced JSON block:
//!
//! ````text
//! ```json
//! { "tool_call": { "name": "...", "arguments": {...} }, "text_response": "..." }
//! ```
//! ````
//!
//! Malformed blocks, unknown tools and bad arguments are rejected here;
//! the engine only ever sees validated `ToolCall`s.

pub mod call;
pub mod dispatch;

pub use call::ToolCall;
pub use dispatch::{
    dispatch, extract_envelope, extract_json_block, handle_response, ToolEnvelope, ToolOutcome,
    ToolReply,
};
