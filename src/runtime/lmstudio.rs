//! LM Studio local runtime (OpenAI-style).

use std::time::Duration;

use async_trait::async_trait;

use super::openai_style::OpenAiStyleAdapter;
use super::{RuntimeAdapter, RuntimeEnvelope};
use crate::error::BenchError;
use crate::tools::ToolDefinition;
use crate::types::{GenerationSettings, Transcript};

pub struct LmStudioAdapter {
    inner: OpenAiStyleAdapter,
}

impl LmStudioAdapter {
    pub fn new(
        model: String,
        base_url: String,
        settings: GenerationSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            inner: OpenAiStyleAdapter::new(
                "lmstudio",
                model,
                base_url,
                "/v1/models",
                settings,
                timeout,
            ),
        }
    }
}

#[async_trait]
impl RuntimeAdapter for LmStudioAdapter {
    fn runtime_name(&self) -> &str {
        self.inner.name()
    }

    fn model_id(&self) -> &str {
        self.inner.model()
    }

    async fn check_availability(&self) -> bool {
        self.inner.check_availability().await
    }

    async fn call(
        &self,
        transcript: &Transcript,
        tools: &[ToolDefinition],
    ) -> Result<RuntimeEnvelope, BenchError> {
        self.inner.call(transcript, tools).await
    }
}
