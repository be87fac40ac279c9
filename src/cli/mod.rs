//! CLI surface for the agentbench binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;
use crate::error::{BenchError, Result};
use crate::runtime::RuntimeKind;

/// Benchmark harness driving local LLM runtimes through a tool-calling loop.
#[derive(Parser, Debug)]
#[command(name = "agentbench", version, about = "Run a task against a local model runtime")]
pub struct Cli {
    /// Task text given to the model
    pub task: String,

    /// Backend runtime (ollama, lmstudio, llamacpp)
    #[arg(short, long)]
    pub runtime: Option<String>,

    /// Model identifier, backend-specific (e.g. llama3.1:8b)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Working directory for all tool operations (created if absent)
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// Maximum backend round trips before forced termination
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Per-call wall-clock timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Suppress per-iteration progress lines (the final outcome always prints)
    #[arg(short, long)]
    pub quiet: bool,

    /// Backend base URL override
    #[arg(long)]
    pub base_url: Option<String>,

    /// Write the run report (outcome + transcript) to this path as JSON
    #[arg(long)]
    pub transcript_out: Option<PathBuf>,
}

impl Cli {
    /// Convert flags into the override layer of the config resolver.
    pub fn overrides(&self) -> Result<ConfigOverrides> {
        let runtime = match &self.runtime {
            Some(raw) => Some(
                raw.parse::<RuntimeKind>()
                    .map_err(|_| BenchError::UnknownRuntime(raw.clone()))?,
            ),
            None => None,
        };

        Ok(ConfigOverrides {
            runtime,
            model: self.model.clone(),
            timeout_secs: self.timeout,
            max_iterations: self.max_iterations,
            // An absent flag must not shadow the env layer.
            quiet: self.quiet.then_some(true),
            workdir: self.workdir.clone(),
            base_url: self.base_url.clone(),
        })
    }
}
