//! The orchestration loop.
//!
//! Owns the transcript, drives adapter calls, dispatches tool calls through
//! the registry, and decides termination. The loop never inspects tool-call
//! semantics beyond the name [`TASK_COMPLETE`]; every other tool is an
//! opaque `invoke → text` entry, which is why new tools never require loop
//! changes.

use tracing::debug;

use super::events::{EventSink, RunEvent};
use super::types::{LoopOutcome, LoopReport};
use crate::error::BenchError;
use crate::runtime::RuntimeAdapter;
use crate::tools::{ToolRegistry, TASK_COMPLETE};
use crate::types::Transcript;

/// Options consumed by [`TaskRunner::run`].
pub struct RunnerOptions {
    /// Maximum number of backend round trips before forced termination.
    pub max_iterations: usize,
    /// Optional observational event callback.
    pub event_sink: Option<EventSink>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            event_sink: None,
        }
    }
}

/// Drives one task through the agentic loop against one adapter.
pub struct TaskRunner {
    adapter: Box<dyn RuntimeAdapter>,
    registry: ToolRegistry,
    options: RunnerOptions,
}

impl TaskRunner {
    pub fn new(
        adapter: Box<dyn RuntimeAdapter>,
        registry: ToolRegistry,
        options: RunnerOptions,
    ) -> Self {
        Self {
            adapter,
            registry,
            options,
        }
    }

    fn emit(&self, event: RunEvent) {
        if let Some(sink) = &self.options.event_sink {
            (sink)(event);
        }
    }

    /// Run the loop to termination.
    ///
    /// `Ok` covers all three loop outcomes; `Err` is reserved for fatal
    /// transport and parse failures, which abort with no retry.
    pub async fn run(&self, task: &str) -> Result<LoopReport, BenchError> {
        let effective_task = self.adapter.preprocess_task(task);
        let mut transcript = Transcript::with_task(effective_task);
        let tool_defs = self.registry.definitions();
        let mut iteration = 0usize;

        while iteration < self.options.max_iterations {
            iteration += 1;
            self.emit(RunEvent::IterationStarted { iteration });
            debug!(
                runtime = self.adapter.runtime_name(),
                model = self.adapter.model_id(),
                iteration,
                "backend call"
            );

            // Transport and parse failures both land here; they are fatal
            // to the run and surface unchanged.
            let envelope = self.adapter.call(&transcript, &tool_defs).await?;

            transcript.push_assistant(envelope.raw_assistant_turn);

            if let Some(text) = &envelope.text {
                self.emit(RunEvent::AssistantText { text: text.clone() });
            }

            if envelope.tool_calls.is_empty() {
                // The model believes it is finished without signaling
                // explicitly. Not an error, but named differently in logs.
                debug!(iteration, "no tool calls; stopping");
                return Ok(LoopReport::new(
                    LoopOutcome::CompletedNoToolCalls {
                        text: envelope.text,
                    },
                    iteration,
                    transcript,
                ));
            }

            // Strictly sequential, in emitted order: later calls in the
            // batch may depend on side effects of earlier ones.
            for call in &envelope.tool_calls {
                self.emit(RunEvent::ToolCallStarted { call: call.clone() });
                let observation = self.registry.dispatch(call).await;

                if call.name == TASK_COMPLETE {
                    // Short-circuit: remaining calls in this batch never
                    // run and no further turns are appended.
                    debug!(iteration, "completion tool invoked");
                    return Ok(LoopReport::new(
                        LoopOutcome::CompletedExplicit {
                            summary: observation,
                        },
                        iteration,
                        transcript,
                    ));
                }

                self.emit(RunEvent::ToolObservation {
                    call_id: call.id.clone(),
                    text: observation.clone(),
                });
                transcript.push_tool_result(&call.id, observation);
            }
        }

        debug!(
            iterations = self.options.max_iterations,
            "iteration ceiling reached"
        );
        Ok(LoopReport::new(
            LoopOutcome::CeilingReached,
            iteration,
            transcript,
        ))
    }
}
