//! Runtime adapter trait and implementations.
//!
//! One adapter per local backend family, each hiding its wire format behind
//! the same envelope so the orchestration loop never sees backend-specific
//! shapes.

pub mod http;
pub mod llamacpp;
pub mod lmstudio;
pub mod ollama;
pub mod openai_style;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::HarnessConfig;
use crate::error::BenchError;
use crate::tools::ToolDefinition;
use crate::types::{GenerationSettings, Transcript};

/// Supported backend families.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuntimeKind {
    Ollama,
    Lmstudio,
    Llamacpp,
}

/// A tool invocation requested by the model.
///
/// Backends that omit call ids get positional synthesized ids; `arguments`
/// is always structured JSON after [`normalize_arguments`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// The adapter's normalized view of one backend response.
#[derive(Debug, Clone)]
pub struct RuntimeEnvelope {
    /// Assistant text, when the backend produced any.
    pub text: Option<String>,
    /// Tool calls in the order the backend emitted them.
    pub tool_calls: Vec<ToolCallRequest>,
    /// The backend's own wire-shaped assistant message, preserved verbatim
    /// for byte-faithful replay on the next request.
    pub raw_assistant_turn: serde_json::Value,
}

/// Core trait implemented by all runtime adapters.
#[async_trait]
pub trait RuntimeAdapter: Send + Sync {
    /// Runtime family name (e.g. "ollama").
    fn runtime_name(&self) -> &str;

    /// The model ID this adapter instance drives.
    fn model_id(&self) -> &str;

    /// Backend/model-specific task rewrite applied before the first turn.
    fn preprocess_task(&self, task: &str) -> String {
        task.to_string()
    }

    /// Lightweight reachability probe against the backend's own
    /// health/listing endpoint. Called once before the loop starts.
    async fn check_availability(&self) -> bool;

    /// Perform one complete (non-streaming) backend round trip.
    async fn call(
        &self,
        transcript: &Transcript,
        tools: &[ToolDefinition],
    ) -> Result<RuntimeEnvelope, BenchError>;
}

/// Blanket delegation so a shared `Arc<dyn RuntimeAdapter>` (or `Arc<T>`)
/// satisfies the trait by forwarding to the inner adapter. Lets callers keep
/// a cloneable handle on an adapter while also handing it to the runner.
#[async_trait]
impl<T: RuntimeAdapter + ?Sized> RuntimeAdapter for std::sync::Arc<T> {
    fn runtime_name(&self) -> &str {
        (**self).runtime_name()
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    fn preprocess_task(&self, task: &str) -> String {
        (**self).preprocess_task(task)
    }

    async fn check_availability(&self) -> bool {
        (**self).check_availability().await
    }

    async fn call(
        &self,
        transcript: &Transcript,
        tools: &[ToolDefinition],
    ) -> Result<RuntimeEnvelope, BenchError> {
        (**self).call(transcript, tools).await
    }
}

/// Default base URL for each runtime's local serving process.
pub fn default_base_url(kind: RuntimeKind) -> &'static str {
    match kind {
        RuntimeKind::Ollama => "http://localhost:11434",
        RuntimeKind::Lmstudio => "http://localhost:1234",
        RuntimeKind::Llamacpp => "http://localhost:8080",
    }
}

/// Create an adapter for the selected runtime, using the resolved config.
pub fn create_adapter(config: &HarnessConfig) -> Box<dyn RuntimeAdapter> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let settings = GenerationSettings::default();
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| default_base_url(config.runtime).to_string());
    match config.runtime {
        RuntimeKind::Ollama => Box::new(ollama::OllamaAdapter::new(
            config.model.clone(),
            base_url,
            settings,
            timeout,
        )),
        RuntimeKind::Lmstudio => Box::new(lmstudio::LmStudioAdapter::new(
            config.model.clone(),
            base_url,
            settings,
            timeout,
        )),
        RuntimeKind::Llamacpp => Box::new(llamacpp::LlamaCppAdapter::new(
            config.model.clone(),
            base_url,
            settings,
            timeout,
        )),
    }
}

/// Normalize a tool call's argument payload to structured JSON.
///
/// Some backends ship arguments as a JSON-encoded string rather than an
/// object; parse it when possible, and pass the raw string through as a
/// best-effort fallback when it is not valid JSON.
pub fn normalize_arguments(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::String(raw) => {
            serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
        }
        other => other,
    }
}
