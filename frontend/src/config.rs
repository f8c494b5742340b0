use shared::RetryPolicy;

const PRODUCTION_API: &str =
    "https://solana-game-signals-and-predictive-modelling-production.up.railway.app";

pub struct Config;

impl Config {
    /// Base URL of the analytics API, without a trailing slash.
    ///
    /// Set `API_BASE_URL` at build time (e.g. `API_BASE_URL=http://localhost:8000 trunk serve`)
    /// to point the dashboard at another deployment.
    pub fn api_base_url() -> String {
        let raw = option_env!("API_BASE_URL").unwrap_or(PRODUCTION_API);
        normalize_base_url(raw)
    }

    pub fn refresh_interval_ms() -> u32 {
        30_000
    }

    pub fn retry_policy() -> RetryPolicy {
        RetryPolicy::default()
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        PRODUCTION_API.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        assert_eq!(normalize_base_url("http://localhost:8000//"), "http://localhost:8000");
        assert_eq!(normalize_base_url("  "), PRODUCTION_API);
    }

    #[test]
    fn test_intervals() {
        assert_eq!(Config::refresh_interval_ms(), 30_000);
        assert_eq!(Config::retry_policy().max_attempts, 3);
    }
}
