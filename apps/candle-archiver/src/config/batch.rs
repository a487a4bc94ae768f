//! Batch behaviour configuration.

use serde::{Deserialize, Serialize};

/// Per-run behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Skip a symbol whose archive exists but cannot be read, instead of
    /// rewriting it from a single fetched page.
    #[serde(default)]
    pub strict_history: bool,
}
