//! Shared OpenAI-style chat-completions core.
//!
//! LM Studio and llama.cpp's server speak the same dialect: a conversation
//! array plus a tool-schema array in, a "first choice" indirection out, tool
//! arguments JSON-encoded as strings, and tool-result turns correlated by
//! `tool_call_id`. The named adapters wrap this core and differ only in
//! default base URL and availability-probe path.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::http::{get_ok, post_json};
use super::{normalize_arguments, RuntimeEnvelope, ToolCallRequest};
use crate::error::BenchError;
use crate::tools::ToolDefinition;
use crate::types::{GenerationSettings, Transcript, TranscriptTurn};

pub struct OpenAiStyleAdapter {
    name: &'static str,
    model: String,
    base_url: String,
    probe_path: &'static str,
    settings: GenerationSettings,
    timeout: Duration,
}

impl OpenAiStyleAdapter {
    pub fn new(
        name: &'static str,
        model: String,
        base_url: String,
        probe_path: &'static str,
        settings: GenerationSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            name,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            probe_path,
            settings,
            timeout,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn model(&self) -> &str {
        &self.model
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

        if let Some(temp) = self.settings.temperature {
            obj.insert("temperature".into(), temp.into());
        }
        if let Some(max) = self.settings.max_tokens {
            obj.insert("max_tokens".into(), max.into());
        }
        if let Some(seed) = self.settings.seed {
            obj.insert("seed".into(), seed.into());
        }

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

        body
    }

    pub async fn check_availability(&self) -> bool {
        get_ok(
            &format!("{}{}", self.base_url, self.probe_path),
            self.timeout,
        )
        .await
    }

    pub async fn call(
        &self,
        transcript: &Transcript,
        tools: &[ToolDefinition],
    ) -> Result<RuntimeEnvelope, BenchError> {
        let body = self.build_request_body(transcript, tools);
        let url = format!("{}/v1/chat/completions", self.base_url);

        debug!(runtime = self.name, model = %self.model, "chat completion request");

        let data = post_json(&url, &body, self.timeout).await?;

        if let Some(err) = data.get("error") {
            return Err(BenchError::api(200, err.to_string()));
        }

        let raw_message = data
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .cloned()
            .ok_or_else(|| BenchError::Parse("no choices in response".into()))?;

        let message: ChatMessage = serde_json::from_value(raw_message.clone())
            .map_err(|e| BenchError::Parse(format!("unexpected message shape: {e}")))?;

        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, tc)| ToolCallRequest {
                id: tc.id.unwrap_or_else(|| format!("call_{i}")),
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
        // Replayed verbatim: the backend's own fields must survive untouched.
        TranscriptTurn::Assistant { raw } => raw.clone(),
        TranscriptTurn::ToolResult { call_id, text } => serde_json::json!({
            "role": "tool",
            "tool_call_id": call_id,
            "content": text,
        }),
    }
}

// OpenAI-style response types (internal)

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Deserialize)]
struct ChatToolCall {
    id: Option<String>,
    function: ChatFunction,
}

#[derive(Deserialize)]
struct ChatFunction {
    name: String,
    /// Usually a JSON-encoded string; occasionally already an object.
    arguments: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> OpenAiStyleAdapter {
        OpenAiStyleAdapter::new(
            "lmstudio",
            "test-model".into(),
            "http://localhost:1234".into(),
            "/v1/models",
            GenerationSettings::default(),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn request_body_disables_streaming_and_carries_tools() {
        let transcript = Transcript::with_task("do it");
        let tools = vec![ToolDefinition {
            name: "write_file".into(),
            description: "write".into(),
            parameters: serde_json::json!({"type": "object"}),
        }];

        let body = adapter().build_request_body(&transcript, &tools);

        assert_eq!(body["stream"], false);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "write_file");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "do it");
    }

    #[test]
    fn assistant_turns_replay_verbatim() {
        let raw = serde_json::json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{"id": "x1", "vendor_extra": true}],
        });
        let mut transcript = Transcript::with_task("t");
        transcript.push_assistant(raw.clone());
        transcript.push_tool_result("x1", "done");

        let body = adapter().build_request_body(&transcript, &[]);

        assert_eq!(body["messages"][1], raw);
        assert_eq!(body["messages"][2]["role"], "tool");
        assert_eq!(body["messages"][2]["tool_call_id"], "x1");
        assert_eq!(body["messages"][2]["content"], "done");
    }

    #[test]
    fn tool_results_carry_correlation_id() {
        let mut transcript = Transcript::with_task("t");
        transcript.push_assistant(serde_json::json!({"role": "assistant"}));
        transcript.push_tool_result("call_abc", "observation");

        let body = adapter().build_request_body(&transcript, &[]);
        assert_eq!(body["messages"][2]["tool_call_id"], "call_abc");
    }
}
