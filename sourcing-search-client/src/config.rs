use crate::cache::CacheConfig;
use crate::error::{Result, TransportError};
use crate::transport::UserContext;
use chrono::Duration;
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;
use serde_inline_default::serde_inline_default;
use std::path::Path;
use utils::endpoint::Endpoint;

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "SOURCING_SEARCH_";

#[serde_inline_default]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchClientConfig {
    pub base_url: String,
    #[serde_inline_default("/api/search".to_string())]
    pub search_path: String,
    pub org_id: String,
    pub user_id: String,
    #[serde_inline_default(10)]
    pub default_top_k: usize,
    #[serde_inline_default(300)]
    pub cache_ttl_secs: i64,
    #[serde_inline_default(1000)]
    pub cache_max_entries: usize,
    #[serde_inline_default(true)]
    pub cache_enabled: bool,
}

impl SearchClientConfig {
    pub fn new(base_url: &str, org_id: &str, user_id: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            search_path: "/api/search".to_string(),
            org_id: org_id.to_string(),
            user_id: user_id.to_string(),
            default_top_k: 10,
            cache_ttl_secs: 300,
            cache_max_entries: 1000,
            cache_enabled: true,
        }
    }

    /// Read a YAML file, then let `SOURCING_SEARCH_*` variables override it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract::<Self>()?;
        config.cache()?;
        Ok(config)
    }

    pub fn endpoint(&self) -> std::result::Result<Endpoint, TransportError> {
        Ok(Endpoint::resolve(&self.base_url, &self.search_path)?)
    }

    /// Cache settings; the TTL must be a positive number of seconds chrono
    /// can represent
    pub fn cache(&self) -> Result<CacheConfig> {
        let ttl = Duration::try_seconds(self.cache_ttl_secs)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                figment::Error::from(format!(
                    "cache_ttl_secs must be a positive number of seconds, got {}",
                    self.cache_ttl_secs
                ))
            })?;

        Ok(CacheConfig {
            ttl,
            max_entries: self.cache_max_entries,
            enabled: self.cache_enabled,
        })
    }

    pub fn user(&self) -> UserContext {
        UserContext {
            org_id: self.org_id.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_applies_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "search.yaml",
                concat!(
                    "base_url: \"https://api.example.com\"\n",
                    "org_id: \"org-1\"\n",
                    "user_id: \"user-9\"\n",
                ),
            )?;

            let config = SearchClientConfig::load("search.yaml").map_err(|e| e.to_string())?;
            assert_eq!(
                config,
                SearchClientConfig::new("https://api.example.com", "org-1", "user-9")
            );
            assert_eq!(config.cache().unwrap().ttl, Duration::minutes(5));
            assert_eq!(
                config.endpoint().unwrap().as_str(),
                "https://api.example.com/api/search"
            );
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "search.yaml",
                concat!(
                    "base_url: \"https://api.example.com\"\n",
                    "org_id: \"org-1\"\n",
                    "user_id: \"user-9\"\n",
                    "cache_ttl_secs: 60\n",
                ),
            )?;
            jail.set_env("SOURCING_SEARCH_CACHE_TTL_SECS", "120");
            jail.set_env("SOURCING_SEARCH_CACHE_ENABLED", "false");

            let config = SearchClientConfig::load("search.yaml").map_err(|e| e.to_string())?;
            assert_eq!(config.cache_ttl_secs, 120);
            assert!(!config.cache().unwrap().enabled);
            assert_eq!(config.user().org_id, "org-1");
            Ok(())
        });
    }

    #[test]
    fn test_missing_required_field_is_config_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("search.yaml", "base_url: \"https://api.example.com\"")?;
            let err = SearchClientConfig::load("search.yaml").unwrap_err();
            assert!(matches!(err, crate::Error::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn test_non_positive_ttl_is_config_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "search.yaml",
                concat!(
                    "base_url: \"https://api.example.com\"\n",
                    "org_id: \"org-1\"\n",
                    "user_id: \"user-9\"\n",
                    "cache_ttl_secs: 0\n",
                ),
            )?;
            let err = SearchClientConfig::load("search.yaml").unwrap_err();
            assert!(matches!(err, crate::Error::Config(_)));

            jail.set_env("SOURCING_SEARCH_CACHE_TTL_SECS", "-5");
            let err = SearchClientConfig::load("search.yaml").unwrap_err();
            assert!(err.to_string().contains("cache_ttl_secs"));
            Ok(())
        });
    }

    #[test]
    fn test_out_of_range_ttl_is_rejected_without_panic() {
        let mut config = SearchClientConfig::new("https://api.example.com", "org-1", "user-9");
        config.cache_ttl_secs = i64::MAX;
        assert!(matches!(config.cache(), Err(crate::Error::Config(_))));

        config.cache_ttl_secs = 1;
        assert_eq!(config.cache().unwrap().ttl, Duration::seconds(1));
    }
}
