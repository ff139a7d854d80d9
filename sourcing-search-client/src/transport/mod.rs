pub mod http;

use crate::error::TransportError;
use crate::response::ResultRecord;
use crate::search_options::filters::RequestFilters;
use crate::search_options::llm_options::LlmOptions;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpTransport;

/// Identity sent along with every search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub org_id: String,
    pub user_id: String,
}

/// Body of `POST <search-endpoint>`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
    pub filters: RequestFilters,
    pub user: UserContext,
    pub llm: LlmOptions,
}

/// Metadata reported by the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseMeta {
    pub took_ms: Option<u64>,
    pub retrieval_k: Option<usize>,
    pub reranked: bool,
    pub source: Option<String>,
}

/// Body returned by the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchResponseBody {
    pub results: Vec<ResultRecord>,
    pub meta: ResponseMeta,
}

/// Something that can carry a search request to the remote API.
///
/// Implementations need not honour cancellation promptly; the client drops
/// results of superseded searches on its own.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponseBody, TransportError>;
}
