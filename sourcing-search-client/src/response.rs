use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

/// A single search hit, passed through untouched from the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord(Value);

impl ResultRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Top-level field of the record, if it is an object and has one
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ResultRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Where the results of a delivered search came from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ResultSource {
    Network,
    Cache,
    /// Stale cache served because the live call failed
    CacheError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    pub took_ms: u64,
    pub retrieval_k: usize,
    pub reranked: bool,
    pub source: ResultSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<ResultRecord>,
    pub meta: SearchMeta,
}

impl SearchResponse {
    /// Envelope for results that did not come from a live call
    pub(crate) fn from_cache(results: Vec<ResultRecord>, source: ResultSource) -> Self {
        let retrieval_k = results.len();
        Self {
            results,
            meta: SearchMeta {
                took_ms: 0,
                retrieval_k,
                reranked: false,
                source,
            },
        }
    }

    pub fn source(&self) -> ResultSource {
        self.meta.source
    }
}

/// Result of [`crate::SearchClient::search`].
///
/// `Superseded` means a newer search started before this one settled. It is
/// not an error and callers must not update any visible state for it.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Delivered(SearchResponse),
    Superseded,
}

impl SearchOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchOutcome::Superseded)
    }

    pub fn delivered(self) -> Option<SearchResponse> {
        match self {
            SearchOutcome::Delivered(response) => Some(response),
            SearchOutcome::Superseded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_result_source_names() {
        assert_eq!(ResultSource::Network.to_string(), "network");
        assert_eq!(ResultSource::Cache.as_ref(), "cache");
        assert_eq!(ResultSource::CacheError.to_string(), "cache-error");
        assert_eq!(
            ResultSource::from_str("cache-error").unwrap(),
            ResultSource::CacheError
        );
        assert_eq!(
            serde_json::to_value(ResultSource::CacheError).unwrap(),
            json!("cache-error")
        );
    }

    #[test]
    fn test_cached_envelope_reports_zero_elapsed() {
        let results = vec![ResultRecord::new(json!({ "id": "f-1" }))];
        let response = SearchResponse::from_cache(results, ResultSource::Cache);

        assert_eq!(response.meta.took_ms, 0);
        assert_eq!(response.meta.retrieval_k, 1);
        assert!(!response.meta.reranked);
        assert_eq!(response.results[0].field("id"), Some(&json!("f-1")));
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(SearchOutcome::Superseded.is_superseded());
        assert!(SearchOutcome::Superseded.delivered().is_none());
        let outcome = SearchOutcome::Delivered(SearchResponse::from_cache(
            vec![],
            ResultSource::Cache,
        ));
        assert!(!outcome.is_superseded());
        assert!(outcome.delivered().unwrap().results.is_empty());
    }
}
