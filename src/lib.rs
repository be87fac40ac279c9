//! agentbench — benchmark harness for locally-hosted language models.
//!
//! Drives a model through a tool-calling agentic loop: one growing
//! transcript, a pluggable runtime adapter per backend family (Ollama
//! native, LM Studio and llama.cpp server OpenAI-style), a fixed tool
//! registry, and explicit termination on a completion signal, a
//! no-tool-call response, or the iteration ceiling.
//!
//! # Quick Start
//!
//! ```no_run
//! use agentbench::config::{ConfigOverrides, HarnessConfig};
//! use agentbench::harness::{RunnerOptions, TaskRunner};
//! use agentbench::runtime::create_adapter;
//! use agentbench::tools::benchmark_registry;
//!
//! # async fn example() -> agentbench::error::Result<()> {
//! let config = HarnessConfig::from_env(ConfigOverrides::default())?;
//! let adapter = create_adapter(&config);
//! let registry = benchmark_registry(&config.workdir);
//! let runner = TaskRunner::new(
//!     adapter,
//!     registry,
//!     RunnerOptions {
//!         max_iterations: config.max_iterations,
//!         event_sink: None,
//!     },
//! );
//! let report = runner.run("write OK into file.txt then signal completion").await?;
//! println!("{}", report.outcome.label());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod runtime;
pub mod tools;
pub mod types;
