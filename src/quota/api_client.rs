//! HTTP client for the quota-limit monitor endpoint.

use super::types::{CredentialSet, QuotaLimitResponse};
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

pub const QUOTA_LIMIT_PATH: &str = "/api/monitor/usage/quota/limit";

const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of a formatted usage percentage such as `"42%"`.
pub trait QuotaFetcher {
    fn fetch_percentage(&self, credentials: &CredentialSet, kind: &str) -> Result<String>;
}

/// Blocking client that makes a single request per call, with no retries.
pub struct QuotaClient {
    agent: ureq::Agent,
}

impl QuotaClient {
    pub fn new() -> Self {
        Self::with_timeout(API_TIMEOUT)
    }

    /// Client whose whole request (connect, send, read) is bounded by `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for QuotaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotaFetcher for QuotaClient {
    fn fetch_percentage(&self, credentials: &CredentialSet, kind: &str) -> Result<String> {
        let url = quota_limit_url(&credentials.base_url)?;

        let body: String = self
            .agent
            .get(url.as_str())
            .header("Authorization", credentials.auth_token.as_str())
            .header("Accept-Language", "en-US,en")
            .header("Content-Type", "application/json")
            .call()
            .context("Failed to fetch quota limits")?
            .body_mut()
            .read_to_string()
            .context("Failed to read quota response")?;

        select_percentage(&body, kind)
    }
}

/// Builds the endpoint URL from the origin of `base_url`; any path is dropped.
pub fn quota_limit_url(base_url: &str) -> Result<String> {
    let parsed =
        Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
    let host = parsed
        .host_str()
        .with_context(|| format!("Base URL has no host: {}", base_url))?;

    let origin = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    };
    Ok(format!("{}{}", origin, QUOTA_LIMIT_PATH))
}

/// Picks the first `data.limits` record of the given type and formats its percentage.
pub fn select_percentage(body: &str, kind: &str) -> Result<String> {
    let response: QuotaLimitResponse =
        serde_json::from_str(body).context("Failed to parse quota response")?;

    let record = response
        .data
        .limits
        .iter()
        .find(|record| record.is_kind(kind))
        .with_context(|| format!("No {} record in quota response", kind))?;

    Ok(format_percentage(record.percentage.as_ref()))
}

/// Renders the number the way the endpoint sent it (`42` -> `42%`, `42.5` -> `42.5%`).
fn format_percentage(percentage: Option<&serde_json::Number>) -> String {
    match percentage {
        Some(value) => format!("{}%", value),
        None => "0%".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/api_client_tests.rs"]
mod tests;
