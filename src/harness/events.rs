//! Observational run events.
//!
//! The loop reports progress through a callback owned by the caller; events
//! never affect control flow. Quiet mode is implemented by the caller's sink
//! choosing what to print — the final outcome and fatal errors are reported
//! outside this channel and cannot be suppressed.

use std::sync::Arc;

use crate::runtime::ToolCallRequest;

/// One observational event during a run.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A backend call is about to begin.
    IterationStarted { iteration: usize },
    /// Assistant text surfaced from the envelope.
    AssistantText { text: String },
    /// A tool call is about to be dispatched.
    ToolCallStarted { call: ToolCallRequest },
    /// A tool call produced its observation.
    ToolObservation { call_id: String, text: String },
}

/// Callback used for streaming run events to the caller.
pub type EventSink = Arc<dyn Fn(RunEvent) + Send + Sync>;
