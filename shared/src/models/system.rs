use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;
use crate::format::safe_date;
use crate::normalize::{lenient, FromResponse};

/// Cache state of one upstream analytics query.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheSource {
    /// Filled from the key of the `sources` map
    #[serde(skip)]
    pub key: String,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub source_type: String,
    #[serde(deserialize_with = "lenient::opt_int")]
    pub query_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub cache_age_hours: Option<f64>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_cached: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_fresh: bool,
    /// A timestamp, or `"Never"` for sources not fetched yet
    #[serde(deserialize_with = "lenient::opt_text")]
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub row_count: f64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheStatus {
    #[serde(deserialize_with = "lenient::number")]
    pub cache_duration_hours: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub total_sources: f64,
    /// Ordered by source key
    #[serde(deserialize_with = "sources_by_key")]
    pub sources: Vec<CacheSource>,
}

fn sources_by_key<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<CacheSource>, D::Error> {
    let map = Option::<BTreeMap<String, CacheSource>>::deserialize(d)?.unwrap_or_default();
    Ok(map
        .into_iter()
        .map(|(key, source)| CacheSource { key, ..source })
        .collect())
}

impl CacheStatus {
    /// All sources refresh together, so the first one with a parseable
    /// timestamp stands for the whole dataset. `"Never"` is skipped.
    pub fn last_updated(&self) -> Option<&str> {
        self.sources
            .iter()
            .filter_map(|s| s.last_updated.as_deref())
            .find(|ts| safe_date(ts).is_some())
    }

    pub fn fresh_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.is_fresh).count()
    }
}

impl FromResponse for CacheStatus {
    fn from_response(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthStatus {
    #[serde(deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub version: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub ml_models_trained: bool,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub champion_model: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub models_available: Vec<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

impl FromResponse for HealthStatus {
    fn from_response(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_cache_status_sources() {
        let body = json!({
            "cache_directory": "/tmp/cache",
            "cache_duration_hours": 24.0,
            "total_sources": 2,
            "sources": {
                "gamer_activation": {"type": "Dune Analytics", "query_id": 1, "cache_age_hours": null,
                                      "is_cached": false, "is_fresh": false, "last_updated": "Never", "row_count": 0},
                "gamer_retention": {"type": "Dune Analytics", "query_id": 2, "cache_age_hours": 1.2,
                                     "is_cached": true, "is_fresh": true, "last_updated": "2024-02-01T10:00:00", "row_count": 50}
            }
        });
        let status = CacheStatus::from_response(&body).unwrap();
        assert_eq!(status.sources.len(), 2);
        assert_eq!(status.sources[0].key, "gamer_activation");
        assert_eq!(status.sources[0].cache_age_hours, None);
        assert_eq!(status.sources[1].source_type, "Dune Analytics");
        assert_eq!(status.last_updated(), Some("2024-02-01T10:00:00"));
        assert_eq!(status.fresh_sources(), 1);
    }

    #[test]
    fn test_cache_status_never_refreshed() {
        let status = CacheStatus::from_response(&json!({
            "sources": {"a": {"last_updated": "Never", "row_count": "0"}}
        }))
        .unwrap();
        assert_eq!(status.last_updated(), None);
        assert_eq!(status.sources[0].row_count, 0.0);
    }

    #[test]
    fn test_non_object_bodies_are_decode_errors() {
        let err = CacheStatus::from_response(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        let err = HealthStatus::from_response(&json!("up")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_health() {
        let health = HealthStatus::from_response(&json!({
            "status": "healthy",
            "version": "1.0.0",
            "ml_models_trained": true,
            "models_available": ["xgboost"]
        }))
        .unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.models_available, vec!["xgboost"]);
    }
}
