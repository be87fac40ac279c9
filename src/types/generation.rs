//! Generation settings sent to the backend.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Sampling settings forwarded on each backend request.
///
/// Local runtimes honor only a small parameter surface; anything unset is
/// omitted from the request body.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default)]
pub struct GenerationSettings {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub seed: Option<u64>,
}
