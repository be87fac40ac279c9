//! Typed access to tool call arguments.

use crate::error::BenchError;

/// Wrapper around tool call arguments providing typed extraction.
///
/// Arguments always arrive already normalized to structured JSON — the
/// adapter layer decodes string-encoded payloads before dispatch.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, BenchError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| BenchError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Get an integer argument.
    pub fn get_i64(&self, key: &str) -> Result<i64, BenchError> {
        self.value
            .get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| BenchError::InvalidArgument(format!("Missing integer argument: {key}")))
    }

    /// Get a boolean argument.
    pub fn get_bool(&self, key: &str) -> Result<bool, BenchError> {
        self.value
            .get(key)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| BenchError::InvalidArgument(format!("Missing boolean argument: {key}")))
    }
}
