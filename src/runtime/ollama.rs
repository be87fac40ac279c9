//! Ollama local runtime (native chat API).
//!
//! The one non-OpenAI wire format: POST `/api/chat` with `stream: false`,
//! the assistant message nested directly under `message`, tool-call
//! arguments already structured, and no call ids (positional ids are
//! synthesized). Tool-result turns are bare `{role, content}` pairs with no
//! correlation field.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::http::{get_ok, post_json};
use super::{normalize_arguments, RuntimeAdapter, RuntimeEnvelope, ToolCallRequest};
use crate::error::BenchError;
use crate::tools::ToolDefinition;
use crate::types::{GenerationSettings, Transcript, TranscriptTurn};

/// Model-name prefixes whose responses open with long reasoning blocks;
/// the task gets a suppression directive prepended for these.
const NO_THINK_PREFIXES: &[&str] = &["qwen3"];

const NO_THINK_DIRECTIVE: &str = "/no_think";

pub struct OllamaAdapter {
    model: String,
    base_url: String,
    settings: GenerationSettings,
    timeout: Duration,
}

impl OllamaAdapter {
    pub fn new(
        model: String,
        base_url: String,
        settings: GenerationSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            settings,
            timeout,
        }
    }

    fn build_request_body(
        &self,
        transcript: &Transcript,
        tools: &[ToolDefinition],
    ) -> serde_json::Value {
        let messages: Vec<serde_json::Value> =
            transcript.turns().iter().map(turn_to_message).collect();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });
        let obj = body.as_object_mut().unwrap();

        if !tools.is_empty() {
            let tool_defs: Vec<serde_json::Value> = tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            obj.insert("tools".into(), tool_defs.into());
        }

        let mut options = serde_json::Map::new();
        if let Some(temp) = self.settings.temperature {
            options.insert("temperature".into(), temp.into());
        }
        if let Some(max) = self.settings.max_tokens {
            options.insert("num_predict".into(), max.into());
        }
        if let Some(seed) = self.settings.seed {
            options.insert("seed".into(), seed.into());
        }
        if !options.is_empty() {
            obj.insert("options".into(), options.into());
        }

        body
    }
}

#[async_trait]
impl RuntimeAdapter for OllamaAdapter {
    fn runtime_name(&self) -> &str {
        "ollama"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    /// Prefix match on the model id, not a capability negotiation.
    fn preprocess_task(&self, task: &str) -> String {
        if NO_THINK_PREFIXES.iter().any(|p| self.model.starts_with(p)) {
            format!("{NO_THINK_DIRECTIVE} {task}")
        } else {
            task.to_string()
        }
    }

    async fn check_availability(&self) -> bool {
        get_ok(&format!("{}/api/tags", self.base_url), self.timeout).await
    }

    async fn call(
        &self,
        transcript: &Transcript,
        tools: &[ToolDefinition],
    ) -> Result<RuntimeEnvelope, BenchError> {
        let body = self.build_request_body(transcript, tools);
        let url = format!("{}/api/chat", self.base_url);

        debug!(runtime = "ollama", model = %self.model, "chat request");

        let data = post_json(&url, &body, self.timeout).await?;

        if let Some(err) = data.get("error") {
            return Err(BenchError::api(200, err.to_string()));
        }

        let raw_message = data
            .get("message")
            .cloned()
            .ok_or_else(|| BenchError::Parse("no message in response".into()))?;

        let message: OllamaMessage = serde_json::from_value(raw_message.clone())
            .map_err(|e| BenchError::Parse(format!("unexpected message shape: {e}")))?;

        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, tc)| ToolCallRequest {
                id: format!("call_{i}"),
                name: tc.function.name,
                arguments: normalize_arguments(tc.function.arguments),
            })
            .collect();

        Ok(RuntimeEnvelope {
            text: message.content.filter(|t| !t.is_empty()),
            tool_calls,
            raw_assistant_turn: raw_message,
        })
    }
}

fn turn_to_message(turn: &TranscriptTurn) -> serde_json::Value {
    match turn {
        TranscriptTurn::User { text } => serde_json::json!({
            "role": "user",
            "content": text,
        }),
        TranscriptTurn::Assistant { raw } => raw.clone(),
        // No correlation id on this wire; results map to calls by order.
        TranscriptTurn::ToolResult { text, .. } => serde_json::json!({
            "role": "tool",
            "content": text,
        }),
    }
}

// Ollama native response types (internal)

#[derive(Deserialize)]
struct OllamaMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OllamaToolCall>>,
}

#[derive(Deserialize)]
struct OllamaToolCall {
    function: OllamaFunction,
}

#[derive(Deserialize)]
struct OllamaFunction {
    name: String,
    arguments: serde_json::Value,
}
