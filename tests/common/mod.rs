//! Shared test support: a scripted runtime adapter with queued envelopes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use agentbench::error::BenchError;
use agentbench::runtime::{RuntimeAdapter, RuntimeEnvelope, ToolCallRequest};
use agentbench::tools::ToolDefinition;
use agentbench::types::Transcript;

/// Test adapter that returns queued envelopes and records every call.
///
/// When the queue runs dry it either repeats the last queued envelope
/// (`repeating`) or falls back to a plain no-tool-call text reply.
pub struct ScriptedAdapter {
    envelopes: Mutex<VecDeque<RuntimeEnvelope>>,
    transcripts: Mutex<Vec<Transcript>>,
    calls: AtomicUsize,
    repeating: bool,
}

impl ScriptedAdapter {
    pub fn new() -> Self {
        Self {
            envelopes: Mutex::new(VecDeque::new()),
            transcripts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            repeating: false,
        }
    }

    /// Adapter that answers every call with the same envelope.
    pub fn repeating(envelope: RuntimeEnvelope) -> Self {
        Self {
            envelopes: Mutex::new(VecDeque::from([envelope])),
            transcripts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            repeating: true,
        }
    }

    pub fn queue(&self, envelope: RuntimeEnvelope) {
        self.envelopes.lock().unwrap().push_back(envelope);
    }

    pub fn queue_text(&self, text: &str) {
        self.queue(text_envelope(text));
    }

    pub fn queue_tool_calls(&self, calls: Vec<ToolCallRequest>) {
        self.queue(tool_call_envelope(calls));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Transcript snapshot seen by the n-th backend call (0-based).
    pub fn transcript_at(&self, n: usize) -> Transcript {
        self.transcripts.lock().unwrap()[n].clone()
    }
}

#[async_trait]
impl RuntimeAdapter for ScriptedAdapter {
    fn runtime_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }

    async fn check_availability(&self) -> bool {
        true
    }

    async fn call(
        &self,
        transcript: &Transcript,
        _tools: &[ToolDefinition],
    ) -> Result<RuntimeEnvelope, BenchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.transcripts.lock().unwrap().push(transcript.clone());

        let mut queue = self.envelopes.lock().unwrap();
        if self.repeating {
            return Ok(queue.front().cloned().expect("repeating envelope present"));
        }
        Ok(queue.pop_front().unwrap_or_else(|| text_envelope("done")))
    }
}

// The `Arc<ScriptedAdapter>: RuntimeAdapter` delegation now comes from a
// blanket impl in the library, so tests can keep an `Arc` handle on the
// adapter after handing a boxed clone to the runner.

/// Envelope carrying assistant text and no tool calls.
pub fn text_envelope(text: &str) -> RuntimeEnvelope {
    RuntimeEnvelope {
        text: Some(text.to_string()),
        tool_calls: Vec::new(),
        raw_assistant_turn: serde_json::json!({
            "role": "assistant",
            "content": text,
        }),
    }
}

/// Envelope carrying tool calls (and no text).
pub fn tool_call_envelope(calls: Vec<ToolCallRequest>) -> RuntimeEnvelope {
    let wire_calls: Vec<serde_json::Value> = calls
        .iter()
        .map(|c| {
            serde_json::json!({
                "id": c.id,
                "type": "function",
                "function": {"name": c.name, "arguments": c.arguments.to_string()},
            })
        })
        .collect();
    RuntimeEnvelope {
        text: None,
        tool_calls: calls,
        raw_assistant_turn: serde_json::json!({
            "role": "assistant",
            "content": null,
            "tool_calls": wire_calls,
        }),
    }
}

/// Convenience constructor for a tool call request.
pub fn call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCallRequest {
    ToolCallRequest {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}
