use serde::Deserialize;

use crate::normalize::lenient;

/// Cache metadata attached to every analytics response.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiMetadata {
    /// Upstream query source name
    #[serde(deserialize_with = "lenient::opt_text")]
    pub source: Option<String>,

    /// Upstream query identifier
    #[serde(deserialize_with = "lenient::opt_int")]
    pub query_id: Option<i64>,

    /// When the cached result was last refreshed, in one of the API's
    /// timestamp shapes (see [`crate::format::safe_date`])
    #[serde(deserialize_with = "lenient::opt_text")]
    pub last_updated: Option<String>,

    #[serde(deserialize_with = "lenient::opt_number")]
    pub cache_age_hours: Option<f64>,

    #[serde(deserialize_with = "lenient::opt_flag")]
    pub is_fresh: Option<bool>,

    #[serde(deserialize_with = "lenient::opt_text")]
    pub next_refresh: Option<String>,

    #[serde(deserialize_with = "lenient::opt_count")]
    pub row_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_metadata_coerces_loose_types() {
        let row = json!({
            "source": "dune",
            "query_id": 4567,
            "last_updated": "2024-02-01 08:00:00",
            "cache_age_hours": "1.5",
            "is_fresh": true,
            "row_count": 120,
            "next_refresh": null
        });
        let meta = ApiMetadata::deserialize(&row).unwrap();
        assert_eq!(meta.source.as_deref(), Some("dune"));
        assert_eq!(meta.query_id, Some(4567));
        assert_eq!(meta.cache_age_hours, Some(1.5));
        assert_eq!(meta.is_fresh, Some(true));
        assert_eq!(meta.row_count, Some(120));
        assert_eq!(meta.next_refresh, None);
    }

    #[test]
    fn test_metadata_missing_fields_default() {
        let meta = ApiMetadata::deserialize(&json!({"is_fresh": "yes", "extra": [1, 2]})).unwrap();
        assert_eq!(meta, ApiMetadata { is_fresh: Some(true), ..ApiMetadata::default() });
    }
}
