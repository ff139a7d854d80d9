pub mod filters;
pub mod llm_options;

use filters::SearchFilters;
use getset::{CopyGetters, Getters};
use llm_options::LlmOptions;

/// Caller-facing options for a single search.
///
/// Verified-only is not an option here: every request the client sends
/// carries `verifiedOnly: true`.
#[derive(Debug, Clone, Default, PartialEq, Getters, CopyGetters)]
pub struct SearchOptions {
    /// Result-count limit; `None` falls back to the client's configured default
    #[getset(get_copy = "pub")]
    top_k: Option<usize>,
    #[getset(get = "pub")]
    filters: SearchFilters,
    #[getset(get = "pub")]
    llm: LlmOptions,
}

impl SearchOptions {
    pub fn new(top_k: Option<usize>, filters: SearchFilters, llm: LlmOptions) -> Self {
        Self {
            top_k,
            filters,
            llm,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_llm(mut self, llm: LlmOptions) -> Self {
        self.llm = llm;
        self
    }
}
