use serde::{Deserialize, Serialize};

/// Structured filters forwarded to the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<String>,
    /// Upper bound on minimum order quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_moq: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lead_time_days: Option<u32>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Filters as they go over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilters {
    #[serde(flatten)]
    filters: SearchFilters,
    verified_only: bool,
}

impl RequestFilters {
    /// Wrap caller filters, restricting results to verified records
    pub fn verified(filters: SearchFilters) -> Self {
        Self {
            filters,
            verified_only: true,
        }
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn verified_only(&self) -> bool {
        self.verified_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_filters_always_verified() {
        let filters = SearchFilters {
            countries: vec!["VN".to_string()],
            max_moq: Some(500),
            ..Default::default()
        };

        let wire = serde_json::to_value(RequestFilters::verified(filters)).unwrap();
        assert_eq!(
            wire,
            json!({ "countries": ["VN"], "maxMoq": 500, "verifiedOnly": true })
        );
    }

    #[test]
    fn test_empty_filters() {
        assert!(SearchFilters::default().is_empty());
        let filters = SearchFilters {
            categories: vec!["apparel".to_string()],
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }
}
