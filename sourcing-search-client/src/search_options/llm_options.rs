use serde::{Deserialize, Serialize};

/// LLM assistance requested from the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmOptions {
    pub enabled: bool,
    pub explanations: bool,
    pub max_tokens: u32,
}

impl Default for LlmOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            explanations: false,
            max_tokens: 256,
        }
    }
}
