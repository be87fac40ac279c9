//! Core types for agentbench.

pub mod generation;
pub mod transcript;

pub use generation::*;
pub use transcript::*;
