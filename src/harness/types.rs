//! Run outcome types for the orchestration loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Transcript;

/// Unique run identifier.
pub type RunId = Uuid;

/// How a run ended.
///
/// All three variants are successful terminations from the process's point
/// of view; fatal transport/parse failures travel on the `Err` side of
/// [`TaskRunner::run`](crate::harness::TaskRunner::run) instead. "The model
/// stopped" is deliberately distinguishable from "the model said it was
/// done".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoopOutcome {
    /// The model invoked the designated completion tool.
    CompletedExplicit { summary: String },
    /// The model replied with text and no tool calls.
    CompletedNoToolCalls { text: Option<String> },
    /// The iteration ceiling was reached without a completion signal.
    CeilingReached,
}

impl LoopOutcome {
    /// Short label used in logs and the final outcome line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompletedExplicit { .. } => "completed",
            Self::CompletedNoToolCalls { .. } => "stopped-without-completion",
            Self::CeilingReached => "ceiling-reached",
        }
    }
}

/// Result of one full run: outcome plus the accumulated transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopReport {
    pub run_id: RunId,
    pub outcome: LoopOutcome,
    /// Number of backend calls performed.
    pub iterations: usize,
    pub transcript: Transcript,
    pub finished_at: DateTime<Utc>,
}

impl LoopReport {
    pub fn new(outcome: LoopOutcome, iterations: usize, transcript: Transcript) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            outcome,
            iterations,
            transcript,
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels_are_distinct() {
        let explicit = LoopOutcome::CompletedExplicit { summary: "s".into() };
        let stopped = LoopOutcome::CompletedNoToolCalls { text: None };
        assert_ne!(explicit.label(), stopped.label());
        assert_ne!(stopped.label(), LoopOutcome::CeilingReached.label());
        assert_ne!(explicit.label(), LoopOutcome::CeilingReached.label());
    }

    #[test]
    fn report_serializes_with_tagged_outcome() {
        let report = LoopReport::new(LoopOutcome::CeilingReached, 3, Transcript::with_task("t"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"]["kind"], "ceiling_reached");
        assert_eq!(json["iterations"], 3);
    }
}
