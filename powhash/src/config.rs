use serde::{Deserialize, Serialize};

/// Dispatch policy applied after argument validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Ceiling on the working memory implied by cost parameters (bytes)
    #[serde(default = "default_max_memory_bytes")]
    pub max_memory_bytes: u64,

    /// Optional ceiling on primary input length
    #[serde(default)]
    pub max_input_bytes: Option<usize>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_memory_bytes: default_max_memory_bytes(),
            max_input_bytes: None,
        }
    }
}

impl DispatchConfig {
    /// Parse from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_max_memory_bytes(mut self, limit: u64) -> Self {
        self.max_memory_bytes = limit;
        self
    }

    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }
}

// Default value functions for serde
fn default_max_memory_bytes() -> u64 { 256 * 1024 * 1024 }
