use std::time::Duration;

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::{debug, error};
use serde_json::Value;
use shared::{endpoints, retry_with_policy, ApiError, FromResponse, Result};

use crate::config::Config;

pub fn api_url(endpoint: &str) -> String {
    endpoints::join(&Config::api_base_url(), endpoint)
}

async fn get_once(endpoint: &str, attempt: u32) -> Result<Value> {
    let url = api_url(endpoint);
    debug!("GET {} (attempt {})", url, attempt);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status {
            status: response.status(),
            endpoint: endpoint.to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok(serde_json::from_str(&body)?)
}

fn sleep(delay: Duration) -> TimeoutFuture {
    TimeoutFuture::new(delay.as_millis().min(u32::MAX as u128) as u32)
}

/// GET `endpoint` relative to the configured base URL and parse the body as JSON.
///
/// Transport failures and non-2xx statuses are retried with linear backoff;
/// the last error is returned once the policy is exhausted.
pub async fn fetch_json(endpoint: &str) -> Result<Value> {
    let result = retry_with_policy(
        Config::retry_policy(),
        |attempt| get_once(endpoint, attempt),
        sleep,
    )
    .await;

    if let Err(e) = &result {
        error!("Request to {} failed: {}", endpoint, e);
    }
    result
}

/// Fetch and decode a typed response.
pub async fn fetch<T: FromResponse>(endpoint: &str) -> Result<T> {
    let body = fetch_json(endpoint).await?;
    T::from_response(&body)
}
