//! Tool system: the fixed registry the loop dispatches into.

pub mod arguments;
pub mod builtin;
pub mod registry;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use builtin::{benchmark_registry, TASK_COMPLETE};
pub use registry::ToolRegistry;
pub use tool::{AgentTool, Tool};
pub use types::{ToolDefinition, ToolParameters};
