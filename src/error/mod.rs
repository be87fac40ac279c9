//! Error types for agentbench.

use thiserror::Error;

/// Primary error type for all harness operations.
///
/// Transport failures (`Timeout`, `Network`) and backend parse failures
/// (`Api`, `Parse`) are both fatal to a run; tool failures never reach this
/// type at the loop boundary — the registry folds them into text
/// observations instead.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed backend response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Backend unreachable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tool execution error: {tool_name} — {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown runtime: {0}")]
    UnknownRuntime(String),
}

impl BenchError {
    /// Create a backend API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a tool execution error.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the transport layer rather than the
    /// backend's reply. Both are fatal to a run; logs distinguish them.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Network(_) | Self::Unavailable(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BenchError>;
