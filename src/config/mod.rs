//! Layered configuration (flag > new-style env > legacy env > default).

use std::path::PathBuf;

use crate::error::{BenchError, Result};
use crate::runtime::RuntimeKind;

pub const DEFAULT_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Explicit values from the CLI layer; `None` falls through to env/defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub runtime: Option<RuntimeKind>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_iterations: Option<usize>,
    pub quiet: Option<bool>,
    pub workdir: Option<PathBuf>,
    pub base_url: Option<String>,
}

/// Fully-resolved harness configuration.
///
/// Built exactly once at startup; the loop and adapters receive everything
/// they need from here and perform no ambient lookups of their own.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub runtime: RuntimeKind,
    pub model: String,
    pub timeout_secs: u64,
    pub max_iterations: usize,
    pub quiet: bool,
    pub workdir: PathBuf,
    /// Backend base-URL override; `None` uses the runtime's default port.
    pub base_url: Option<String>,
}

impl HarnessConfig {
    /// Resolve from overrides plus the process environment (loading `.env`
    /// first, ignoring its absence).
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve against an injected variable lookup.
    ///
    /// Per-field precedence: explicit override, then the `AGENTBENCH_*`
    /// variable, then its legacy `BENCH_*` spelling, then the hardcoded
    /// default.
    pub fn resolve<E>(overrides: ConfigOverrides, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let layered = |new_key: &str, legacy_key: &str| env(new_key).or_else(|| env(legacy_key));

        let runtime = match overrides.runtime {
            Some(r) => r,
            None => match layered("AGENTBENCH_RUNTIME", "BENCH_RUNTIME") {
                Some(raw) => raw
                    .parse::<RuntimeKind>()
                    .map_err(|_| BenchError::UnknownRuntime(raw))?,
                None => RuntimeKind::Ollama,
            },
        };

        let model = overrides
            .model
            .or_else(|| layered("AGENTBENCH_MODEL", "BENCH_MODEL"))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match overrides.timeout_secs {
            Some(t) => t,
            None => match layered("AGENTBENCH_TIMEOUT_SECS", "BENCH_TIMEOUT") {
                Some(raw) => raw.parse::<u64>().map_err(|_| {
                    BenchError::Configuration(format!("invalid timeout: {raw}"))
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };

        let max_iterations = match overrides.max_iterations {
            Some(n) => n,
            None => match layered("AGENTBENCH_MAX_ITERATIONS", "BENCH_MAX_ITERATIONS") {
                Some(raw) => raw.parse::<usize>().map_err(|_| {
                    BenchError::Configuration(format!("invalid iteration ceiling: {raw}"))
                })?,
                None => DEFAULT_MAX_ITERATIONS,
            },
        };
        if max_iterations == 0 {
            return Err(BenchError::Configuration(
                "iteration ceiling must be positive".into(),
            ));
        }

        let quiet = match overrides.quiet {
            Some(q) => q,
            None => layered("AGENTBENCH_QUIET", "BENCH_QUIET")
                .map(|raw| matches!(raw.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        let base_url_env = match runtime {
            RuntimeKind::Ollama => "OLLAMA_BASE_URL",
            RuntimeKind::Lmstudio => "LMSTUDIO_BASE_URL",
            RuntimeKind::Llamacpp => "LLAMACPP_BASE_URL",
        };
        let base_url = overrides.base_url.or_else(|| env(base_url_env));

        Ok(Self {
            runtime,
            model,
            timeout_secs,
            max_iterations,
            quiet,
            workdir: overrides.workdir.unwrap_or_else(|| PathBuf::from(".")),
            base_url,
        })
    }
}
