use serde_json::Error as JsonError;
use thiserror::Error;

/// Failures surfaced by the API client to a feature component.
///
/// Malformed or missing record fields are not errors; they are defaulted at
/// decode time (see [`crate::normalize`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Transport failures and non-2xx statuses are worth another attempt.
    /// A body that does not decode will not improve on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Status { .. } => true,
            ApiError::Decode(_) => false,
        }
    }

    /// Short text for inline error banners.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "The analytics API is unreachable".to_string(),
            ApiError::Status { status, .. } if *status == 503 => {
                "Predictions are not available yet".to_string()
            }
            ApiError::Status { status, .. } => format!("The analytics API answered HTTP {}", status),
            ApiError::Decode(_) => "The analytics API returned an unexpected payload".to_string(),
        }
    }
}

impl From<JsonError> for ApiError {
    fn from(error: JsonError) -> Self {
        Self::Decode(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Network("connection reset".into()).is_transient());
        assert!(ApiError::Status { status: 502, endpoint: "/api/health".into() }.is_transient());
        assert!(!ApiError::Decode("expected value".into()).is_transient());
    }

    #[test]
    fn test_display_includes_status_and_endpoint() {
        let err = ApiError::Status { status: 404, endpoint: "/api/ml/models/info".into() };
        assert_eq!(err.to_string(), "HTTP 404 from /api/ml/models/info");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_user_message_for_unavailable_predictions() {
        let err = ApiError::Status { status: 503, endpoint: "/api/ml/predictions/churn".into() };
        assert_eq!(err.user_message(), "Predictions are not available yet");
    }
}
