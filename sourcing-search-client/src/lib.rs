pub mod cache;
pub mod clock;
pub mod config;
mod error;
mod response;
pub mod search_options;
pub mod supersession;
pub mod transport;


use cache::{CacheConfig, CacheKey, SearchCache, SharedSearchCache};
use clock::{Clock, SystemClock};
pub use config::SearchClientConfig;
pub use error::{Error, Result, TransportError};
use futures::future::{Abortable, Aborted};
pub use response::{ResultRecord, ResultSource, SearchMeta, SearchOutcome, SearchResponse};
pub use search_options::filters::SearchFilters;
pub use search_options::llm_options::LlmOptions;
pub use search_options::SearchOptions;
use search_options::filters::RequestFilters;
use std::sync::Arc;
use std::time::Instant;
use supersession::{SharedSupersessionTracker, SupersessionTracker};
pub use transport::{HttpTransport, SearchRequest, SearchTransport, UserContext};

// Re-export stats types
pub use cache::CacheStats;
pub use supersession::TrackerStats;

/// Entry point for sourcing searches.
///
/// Fresh cached results are served without touching the network. Otherwise
/// the search goes out through the transport, and only the most recently
/// started search gets its result delivered. A failed call falls back to
/// whatever is cached for the query, however old.
#[derive(Clone)]
pub struct SearchClient {
    transport: Arc<dyn SearchTransport>,
    clock: Arc<dyn Clock>,
    cache: SharedSearchCache,
    tracker: SharedSupersessionTracker,
    user: UserContext,
    default_top_k: usize,
}

impl SearchClient {
    /// Create a client with its collaborators supplied by the caller
    pub fn new(
        config: &SearchClientConfig,
        transport: Arc<dyn SearchTransport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Ok(Self::with_cache(
            config.cache()?,
            config.user(),
            config.default_top_k,
            transport,
            clock,
        ))
    }

    /// Create a client talking HTTP to the configured endpoint
    pub fn from_config(config: &SearchClientConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        log::info!(
            "Initialized SearchClient for {} (TTL: {}s, Max entries: {})",
            endpoint,
            config.cache_ttl_secs,
            config.cache_max_entries
        );

        Self::new(
            config,
            Arc::new(HttpTransport::new(endpoint)),
            Arc::new(SystemClock),
        )
    }

    pub fn with_cache(
        cache_config: CacheConfig,
        user: UserContext,
        default_top_k: usize,
        transport: Arc<dyn SearchTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            clock,
            cache: Arc::new(SearchCache::new(cache_config)),
            tracker: Arc::new(SupersessionTracker::new()),
            user,
            default_top_k,
        }
    }

    /// Search for `query`.
    ///
    /// Returns [`SearchOutcome::Superseded`] when another search started
    /// before this one settled; that outcome carries no data and is never an
    /// error. Transport failures are returned as errors only when nothing is
    /// cached for the query.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchOutcome> {
        // Every invocation supersedes the one before it, cache hits included
        let (token, registration) = self.tracker.begin();
        let key = CacheKey::new(&self.user.org_id, query);

        // Try cache first
        if let Some(cached) = self.cache.get(&key, self.clock.now()) {
            self.tracker.finish(&token);
            log::info!("Returning cached search result for query: {}", query);
            return Ok(SearchOutcome::Delivered(SearchResponse::from_cache(
                cached.results,
                ResultSource::Cache,
            )));
        }

        let request = self.build_request(query, options);
        log::debug!("Dispatching search {} for query: {}", token.sequence(), query);

        let started = Instant::now();
        let settled = Abortable::new(self.transport.search(&request), registration).await;

        // Whatever happened, a newer search wins
        if !self.tracker.is_current(&token) {
            log::debug!(
                "Discarding result of superseded search {} for query: {}",
                token.sequence(),
                query
            );
            return Ok(SearchOutcome::Superseded);
        }
        self.tracker.finish(&token);

        match settled {
            Err(Aborted) => {
                log::debug!("Search {} was aborted", token.sequence());
                Ok(SearchOutcome::Superseded)
            }
            Ok(Ok(body)) => {
                let took_ms = body
                    .meta
                    .took_ms
                    .unwrap_or_else(|| started.elapsed().as_millis() as u64);
                let retrieval_k = body.meta.retrieval_k.unwrap_or(body.results.len());

                self.cache.put(key, body.results.clone(), self.clock.now());

                Ok(SearchOutcome::Delivered(SearchResponse {
                    results: body.results,
                    meta: SearchMeta {
                        took_ms,
                        retrieval_k,
                        reranked: body.meta.reranked,
                        source: ResultSource::Network,
                    },
                }))
            }
            Ok(Err(err)) => match self.cache.get_stale(&key) {
                Some(stale) => {
                    log::warn!(
                        "Search for query '{}' failed, serving cached results: {}",
                        query,
                        err
                    );
                    Ok(SearchOutcome::Delivered(SearchResponse::from_cache(
                        stale.results,
                        ResultSource::CacheError,
                    )))
                }
                None => Err(err.into()),
            },
        }
    }

    fn build_request(&self, query: &str, options: &SearchOptions) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            top_k: options.top_k().unwrap_or(self.default_top_k),
            filters: RequestFilters::verified(options.filters().clone()),
            user: self.user.clone(),
            llm: *options.llm(),
        }
    }

    /// Supersede the search in flight, if any, without starting another
    pub fn cancel_pending(&self) {
        self.tracker.cancel_pending();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats(self.clock.now())
    }

    pub fn tracker_stats(&self) -> TrackerStats {
        self.tracker.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Drop expired entries, giving up their use as error fallbacks
    pub fn evict_expired_cache(&self) {
        self.cache.evict_expired(self.clock.now());
    }
}
