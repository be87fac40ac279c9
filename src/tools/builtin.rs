//! Built-in benchmark tools.
//!
//! The fixed tool surface the harness offers to every model under test:
//! `write_file`, `read_file`, `run_command`, `list_files`, and
//! `task_complete`. Every file and command operation resolves against the
//! run's working directory. Each tool is constructed via [`AgentTool::new`]
//! and registered into a [`ToolRegistry`] by [`benchmark_registry`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::BenchError;
use crate::tools::registry::ToolRegistry;
use crate::tools::tool::{AgentTool, Tool};
use crate::tools::types::ToolParameters;

/// Name of the explicit-completion tool. The orchestration loop recognizes
/// this name and nothing else about any tool.
pub const TASK_COMPLETE: &str = "task_complete";

const COMMAND_OUTPUT_MAX_BYTES: usize = 32_768;

fn truncate_utf8(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }

    let mut cutoff = max_bytes;
    while cutoff > 0 && !s.is_char_boundary(cutoff) {
        cutoff -= 1;
    }
    s[..cutoff].to_string()
}

fn resolve(workdir: &Path, relative: &str) -> PathBuf {
    workdir.join(relative)
}

/// Create the `write_file` tool — writes content under the working directory.
///
/// Creates parent directories when they do not exist and overwrites existing
/// files. Confirms with the written byte count.
pub fn write_file_tool(workdir: PathBuf) -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "write_file",
        "Write content to a file, creating parent directories if needed",
        ToolParameters::object()
            .string("path", "Path of the file to write, relative to the working directory", true)
            .string("content", "Content to write to the file", true)
            .build(),
        move |args| {
            let workdir = workdir.clone();
            async move {
                let path = args.get_str("path")?.to_string();
                let content = args.get_str("content")?.to_string();
                let target = resolve(&workdir, &path);

                if let Some(parent) = target.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await.map_err(|e| {
                            BenchError::tool(
                                "write_file",
                                format!("failed to create directories for {path}: {e}"),
                            )
                        })?;
                    }
                }

                let bytes = content.len();
                tokio::fs::write(&target, content)
                    .await
                    .map_err(|e| BenchError::tool("write_file", format!("{path}: {e}")))?;

                Ok(format!("Wrote {bytes} bytes to {path}"))
            }
        },
    ))
}

/// Create the `read_file` tool — returns file contents verbatim.
///
/// A missing file is reported as a text observation, not an error: the model
/// is expected to read the message and correct itself.
pub fn read_file_tool(workdir: PathBuf) -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "read_file",
        "Read a file's contents",
        ToolParameters::object()
            .string("path", "Path of the file to read, relative to the working directory", true)
            .build(),
        move |args| {
            let workdir = workdir.clone();
            async move {
                let path = args.get_str("path")?.to_string();
                let target = resolve(&workdir, &path);

                match tokio::fs::read_to_string(&target).await {
                    Ok(content) => Ok(content),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        Ok(format!("File not found: {path}"))
                    }
                    Err(e) => Err(BenchError::tool("read_file", format!("{path}: {e}"))),
                }
            }
        },
    ))
}

/// Create the `run_command` tool — executes a shell command via `sh -c`.
///
/// Runs in the working directory and captures combined stdout+stderr; a
/// non-zero exit status is appended to the observation so the model can see
/// the failure and self-correct. Output beyond 32 KiB is truncated at a
/// UTF-8 boundary. The command itself carries no timeout of its own.
pub fn run_command_tool(workdir: PathBuf) -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "run_command",
        "Execute a shell command in the working directory and return its output",
        ToolParameters::object()
            .string("command", "The shell command to execute", true)
            .build(),
        move |args| {
            let workdir = workdir.clone();
            async move {
                let command = args.get_str("command")?.to_string();

                let output = tokio::process::Command::new("sh")
                    .arg("-c")
                    .arg(&command)
                    .current_dir(&workdir)
                    .output()
                    .await
                    .map_err(|e| BenchError::tool("run_command", e.to_string()))?;

                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let mut combined = format!("{stdout}{stderr}");
                if combined.len() > COMMAND_OUTPUT_MAX_BYTES {
                    combined = truncate_utf8(&combined, COMMAND_OUTPUT_MAX_BYTES);
                    combined.push_str("\n... (truncated)");
                }

                match output.status.code() {
                    Some(0) => Ok(combined),
                    Some(code) => Ok(format!("{combined}\n[exit code: {code}]")),
                    None => Ok(format!("{combined}\n[terminated by signal]")),
                }
            }
        },
    ))
}

/// Create the `list_files` tool — lists directory entries.
///
/// Defaults to the working directory itself. Entries are sorted by name,
/// one per line with kind and size. A missing directory returns the error
/// text verbatim as the observation.
pub fn list_files_tool(workdir: PathBuf) -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "list_files",
        "List files in a directory (defaults to the working directory)",
        ToolParameters::object()
            .string("path", "Directory to list, relative to the working directory (defaults to '.')", false)
            .build(),
        move |args| {
            let workdir = workdir.clone();
            async move {
                let path = args.get_str_opt("path").unwrap_or(".").to_string();
                let target = resolve(&workdir, &path);

                let mut read_dir = match tokio::fs::read_dir(&target).await {
                    Ok(rd) => rd,
                    Err(e) => return Ok(format!("{path}: {e}")),
                };

                let mut entries = Vec::new();
                loop {
                    match read_dir.next_entry().await {
                        Ok(Some(entry)) => {
                            let meta = entry
                                .metadata()
                                .await
                                .map_err(|e| BenchError::tool("list_files", e.to_string()))?;
                            let kind = if meta.is_dir() {
                                "dir"
                            } else if meta.is_file() {
                                "file"
                            } else {
                                "other"
                            };
                            entries.push(format!(
                                "{kind:<5} {size:>10}  {name}",
                                size = meta.len(),
                                name = entry.file_name().to_string_lossy(),
                            ));
                        }
                        Ok(None) => break,
                        Err(e) => return Err(BenchError::tool("list_files", e.to_string())),
                    }
                }

                entries.sort();
                if entries.is_empty() {
                    Ok(format!("{path}: empty directory"))
                } else {
                    Ok(entries.join("\n"))
                }
            }
        },
    ))
}

/// Create the `task_complete` tool — the explicit completion signal.
///
/// Its observation is the model's own summary; the loop short-circuits on
/// the tool's name before any later call in the batch runs.
pub fn task_complete_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        TASK_COMPLETE,
        "Signal that the task is finished, with a short summary of what was done",
        ToolParameters::object()
            .string("summary", "Short summary of the completed work", true)
            .build(),
        |args| async move {
            let summary = args.get_str("summary").unwrap_or("(no summary)");
            Ok(summary.to_string())
        },
    ))
}

/// Build the benchmark tool registry, every tool scoped to `workdir`.
pub fn benchmark_registry(workdir: &Path) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(write_file_tool(workdir.to_path_buf()));
    registry.register(read_file_tool(workdir.to_path_buf()));
    registry.register(run_command_tool(workdir.to_path_buf()));
    registry.register(list_files_tool(workdir.to_path_buf()));
    registry.register(task_complete_tool());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::arguments::ToolArguments;

    fn args(json: serde_json::Value) -> ToolArguments {
        ToolArguments::new(json)
    }

    // ── write_file ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn write_file_creates_file_and_reports_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_file_tool(dir.path().to_path_buf());

        let obs = tool
            .execute(&args(serde_json::json!({"path": "out.txt", "content": "hello bench"})))
            .await
            .unwrap();

        assert_eq!(obs, "Wrote 11 bytes to out.txt");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "hello bench"
        );
    }

    #[tokio::test]
    async fn write_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_file_tool(dir.path().to_path_buf());

        tool.execute(&args(serde_json::json!({"path": "a/b/c.txt", "content": "nested"})))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("a/b/c.txt")).unwrap(),
            "nested"
        );
    }

    #[tokio::test]
    async fn write_file_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), "old").unwrap();
        let tool = write_file_tool(dir.path().to_path_buf());

        tool.execute(&args(serde_json::json!({"path": "f.txt", "content": "new"})))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("f.txt")).unwrap(), "new");
    }

    #[tokio::test]
    async fn write_file_missing_argument_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_file_tool(dir.path().to_path_buf());

        let result = tool.execute(&args(serde_json::json!({"path": "f.txt"}))).await;
        assert!(result.is_err());
    }

    // ── read_file ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn read_file_returns_contents_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.txt"), "line one\nline two\n").unwrap();
        let tool = read_file_tool(dir.path().to_path_buf());

        let obs = tool
            .execute(&args(serde_json::json!({"path": "hello.txt"})))
            .await
            .unwrap();

        assert_eq!(obs, "line one\nline two\n");
    }

    #[tokio::test]
    async fn read_file_missing_returns_not_found_text() {
        let dir = tempfile::tempdir().unwrap();
        let tool = read_file_tool(dir.path().to_path_buf());

        let obs = tool
            .execute(&args(serde_json::json!({"path": "nope.txt"})))
            .await
            .unwrap();

        assert_eq!(obs, "File not found: nope.txt");
    }

    // ── run_command ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn run_command_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let tool = run_command_tool(dir.path().to_path_buf());

        let obs = tool
            .execute(&args(serde_json::json!({"command": "echo hello"})))
            .await
            .unwrap();

        assert!(obs.contains("hello"));
        assert!(!obs.contains("[exit code:"));
    }

    #[tokio::test]
    async fn run_command_captures_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let tool = run_command_tool(dir.path().to_path_buf());

        let obs = tool
            .execute(&args(serde_json::json!({"command": "echo err >&2"})))
            .await
            .unwrap();

        assert!(obs.contains("err"));
    }

    #[tokio::test]
    async fn run_command_appends_nonzero_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let tool = run_command_tool(dir.path().to_path_buf());

        let obs = tool
            .execute(&args(serde_json::json!({"command": "exit 42"})))
            .await
            .unwrap();

        assert!(obs.ends_with("[exit code: 42]"), "got: {obs}");
    }

    #[tokio::test]
    async fn run_command_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
        let tool = run_command_tool(dir.path().to_path_buf());

        let obs = tool
            .execute(&args(serde_json::json!({"command": "cat marker.txt"})))
            .await
            .unwrap();

        assert!(obs.contains("here"));
    }

    #[tokio::test]
    async fn run_command_truncates_large_output() {
        let dir = tempfile::tempdir().unwrap();
        let tool = run_command_tool(dir.path().to_path_buf());
        let cmd = format!("head -c {} /dev/zero | tr '\\0' 'x'", COMMAND_OUTPUT_MAX_BYTES + 1000);

        let obs = tool
            .execute(&args(serde_json::json!({"command": cmd})))
            .await
            .unwrap();

        assert!(obs.contains("... (truncated)"));
    }

    #[test]
    fn truncate_utf8_never_splits_codepoints() {
        let s = "ab😀cd";
        assert_eq!(truncate_utf8(s, 2), "ab");
        // 3..=5 would cut into 😀 (4-byte codepoint), so back off to "ab".
        assert_eq!(truncate_utf8(s, 3), "ab");
        assert_eq!(truncate_utf8(s, 5), "ab");
        assert_eq!(truncate_utf8(s, 6), "ab😀");
    }

    // ── list_files ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn list_files_defaults_to_workdir_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zebra.txt"), "z").unwrap();
        std::fs::write(dir.path().join("alpha.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();
        let tool = list_files_tool(dir.path().to_path_buf());

        let obs = tool.execute(&args(serde_json::json!({}))).await.unwrap();
        let lines: Vec<&str> = obs.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("subdir"), "dirs sort before files here: {obs}");
        assert!(obs.contains("alpha.txt"));
        assert!(obs.contains("zebra.txt"));
    }

    #[tokio::test]
    async fn list_files_reports_kind_and_size() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.txt"), "1234567").unwrap();
        let tool = list_files_tool(dir.path().to_path_buf());

        let obs = tool.execute(&args(serde_json::json!({}))).await.unwrap();

        assert!(obs.starts_with("file"));
        assert!(obs.contains('7'));
        assert!(obs.contains("data.txt"));
    }

    #[tokio::test]
    async fn list_files_missing_directory_returns_error_text() {
        let dir = tempfile::tempdir().unwrap();
        let tool = list_files_tool(dir.path().to_path_buf());

        let obs = tool
            .execute(&args(serde_json::json!({"path": "no_such_dir"})))
            .await
            .unwrap();

        assert!(obs.starts_with("no_such_dir:"), "got: {obs}");
    }

    // ── task_complete ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn task_complete_echoes_summary() {
        let tool = task_complete_tool();
        let obs = tool
            .execute(&args(serde_json::json!({"summary": "all done"})))
            .await
            .unwrap();

        assert_eq!(obs, "all done");
    }

    // ── registry ────────────────────────────────────────────────────────────

    #[test]
    fn benchmark_registry_has_five_tools_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        let registry = benchmark_registry(dir.path());
        let names: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();

        assert_eq!(
            names,
            vec!["write_file", "read_file", "run_command", "list_files", "task_complete"]
        );
    }

    #[test]
    fn each_tool_has_object_parameter_schema() {
        let dir = tempfile::tempdir().unwrap();
        let registry = benchmark_registry(dir.path());
        for def in registry.definitions() {
            assert_eq!(def.parameters["type"], "object", "tool '{}'", def.name);
        }
    }
}
