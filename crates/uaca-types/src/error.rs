// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — UACA Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for the UACA engine and its adapters.
///
/// Simulation operations themselves never fail; only configuration,
/// timer threads, and externally supplied tool calls do.
#[derive(Error, Debug)]
pub enum UacaError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A scheduler timer thread could not be started.
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// Tool call was malformed or carried invalid arguments.
    #[error("tool call error: {0}")]
    ToolCall(String),

    /// Tool call named a tool the engine does not expose.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

pub type UacaResult<T> = Result<T, UacaError>;
