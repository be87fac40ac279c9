//! Conversation transcript types.

use serde::{Deserialize, Serialize};

/// One turn of the conversation between the task, the model, and the tools.
///
/// Assistant turns hold the backend's wire-shaped message verbatim: the next
/// request must replay prior assistant turns byte-faithfully, including
/// backend-specific fields the loop never interprets. Tool-result turns are
/// kept neutral; each adapter renders them into its own wire shape (with or
/// without the correlation id) at request-build time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum TranscriptTurn {
    User {
        text: String,
    },
    Assistant {
        raw: serde_json::Value,
    },
    ToolResult {
        call_id: String,
        text: String,
    },
}

/// Append-only ordered sequence of conversation turns.
///
/// Once appended, a turn is never mutated; the only write operations are the
/// `push_*` constructors below.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    turns: Vec<TranscriptTurn>,
}

impl Transcript {
    /// Create a transcript seeded with the initial user task.
    pub fn with_task(task: impl Into<String>) -> Self {
        Self {
            turns: vec![TranscriptTurn::User { text: task.into() }],
        }
    }

    /// Append the backend's raw assistant message.
    pub fn push_assistant(&mut self, raw: serde_json::Value) {
        self.turns.push(TranscriptTurn::Assistant { raw });
    }

    /// Append one tool-result turn.
    pub fn push_tool_result(&mut self, call_id: impl Into<String>, text: impl Into<String>) {
        self.turns.push(TranscriptTurn::ToolResult {
            call_id: call_id.into(),
            text: text.into(),
        });
    }

    pub fn turns(&self) -> &[TranscriptTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
