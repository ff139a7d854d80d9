use getset::Getters;
use url::Url;

pub use url::ParseError;

/// A fully resolved remote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[get = "pub"]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Join `path` onto `base`. A missing trailing slash on the base is added
    /// so that `https://host/v1` + `search` resolves to `https://host/v1/search`.
    pub fn resolve(base: &str, path: &str) -> Result<Self, ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        let url = base.join(path.trim_start_matches('/'))?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_base_path() {
        let endpoint = Endpoint::resolve("https://api.example.com/v1", "/api/search").unwrap();
        assert_eq!(endpoint.as_str(), "https://api.example.com/v1/api/search");

        let endpoint = Endpoint::resolve("https://api.example.com/v1/", "search").unwrap();
        assert_eq!(endpoint.as_str(), "https://api.example.com/v1/search");
    }

    #[test]
    fn test_resolve_rejects_relative_base() {
        assert!(Endpoint::resolve("not a url", "/search").is_err());
    }
}
