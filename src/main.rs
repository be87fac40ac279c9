//! agentbench binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use agentbench::cli::Cli;
use agentbench::config::HarnessConfig;
use agentbench::error::BenchError;
use agentbench::harness::{EventSink, LoopOutcome, RunEvent, RunnerOptions, TaskRunner};
use agentbench::runtime::create_adapter;
use agentbench::tools::benchmark_registry;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // Fatal errors are always visible, quiet mode or not.
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), BenchError> {
    let transcript_out = cli.transcript_out.clone();
    let config = HarnessConfig::from_env(cli.overrides()?)?;

    std::fs::create_dir_all(&config.workdir)?;

    let adapter = create_adapter(&config);
    if !adapter.check_availability().await {
        return Err(BenchError::Unavailable(format!(
            "{} runtime did not answer its availability probe",
            adapter.runtime_name()
        )));
    }

    let registry = benchmark_registry(&config.workdir);
    let sink = progress_sink(config.quiet);
    let runner = TaskRunner::new(
        adapter,
        registry,
        RunnerOptions {
            max_iterations: config.max_iterations,
            event_sink: Some(sink),
        },
    );

    let report = runner.run(&cli.task).await?;

    // The final outcome line is never suppressed.
    match &report.outcome {
        LoopOutcome::CompletedExplicit { summary } => {
            println!("completed ({} iterations): {summary}", report.iterations);
        }
        LoopOutcome::CompletedNoToolCalls { text } => {
            println!(
                "stopped-without-completion ({} iterations): model returned no tool calls",
                report.iterations
            );
            if let Some(text) = text {
                println!("{text}");
            }
        }
        LoopOutcome::CeilingReached => {
            println!(
                "ceiling-reached: no completion signal after {} iterations",
                report.iterations
            );
        }
    }

    if let Some(path) = transcript_out {
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
    }

    Ok(())
}

fn progress_sink(quiet: bool) -> EventSink {
    Arc::new(move |event: RunEvent| {
        if quiet {
            return;
        }
        match event {
            RunEvent::IterationStarted { iteration } => {
                eprintln!("[iteration {iteration}]");
            }
            RunEvent::AssistantText { text } => {
                eprintln!("  assistant: {}", truncate_line(&text, 200));
            }
            RunEvent::ToolCallStarted { call } => {
                eprintln!("  tool: {} ({})", call.name, call.id);
            }
            RunEvent::ToolObservation { text, .. } => {
                eprintln!("    -> {}", truncate_line(&text, 200));
            }
        }
    })
}

fn truncate_line(s: &str, max: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    if first_line.len() <= max {
        return first_line.to_string();
    }
    let mut end = max;
    while end > 0 && !first_line.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &first_line[..end])
}
