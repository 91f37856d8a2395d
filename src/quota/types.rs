//! Data types for quota lookup.

use serde::Deserialize;
use std::time::{Duration, SystemTime};

/// Display value used whenever no percentage could be obtained.
pub const PLACEHOLDER: &str = "--";

/// Usage record type reported when the caller does not choose one.
pub const DEFAULT_QUERY_KIND: &str = "TOKENS_LIMIT";

pub const AUTH_TOKEN_KEY: &str = "ANTHROPIC_AUTH_TOKEN";
pub const BASE_URL_KEY: &str = "ANTHROPIC_BASE_URL";

/// Token and endpoint resolved from the local settings files.
///
/// Empty strings stand for "not configured"; they are never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    pub auth_token: String,
    pub base_url: String,
}

impl CredentialSet {
    /// Both fields are required before the endpoint is contacted.
    pub fn is_complete(&self) -> bool {
        !self.auth_token.is_empty() && !self.base_url.is_empty()
    }
}

/// The single persisted display value and when it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub value: String,
    pub modified: SystemTime,
}

impl CacheEntry {
    /// Age of the entry relative to `now`. A timestamp in the future counts as zero.
    pub fn age_at(&self, now: SystemTime) -> Duration {
        now.duration_since(self.modified).unwrap_or(Duration::ZERO)
    }
}

/// Result of one lookup before it is turned into a display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Served from a cache entry younger than the TTL.
    Fresh(String),
    /// Fetched from the endpoint during this lookup.
    Refreshed(String),
    /// Credentials missing or the fetch failed.
    Unavailable,
}

impl LookupOutcome {
    pub fn display(&self) -> &str {
        match self {
            LookupOutcome::Fresh(value) | LookupOutcome::Refreshed(value) => value,
            LookupOutcome::Unavailable => PLACEHOLDER,
        }
    }

    pub fn into_display(self) -> String {
        match self {
            LookupOutcome::Fresh(value) | LookupOutcome::Refreshed(value) => value,
            LookupOutcome::Unavailable => PLACEHOLDER.to_string(),
        }
    }
}

/// Subset of an opencode / Claude settings document.
#[derive(Debug, Deserialize)]
pub struct SettingsFile {
    pub env: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Body of `GET /api/monitor/usage/quota/limit`.
#[derive(Debug, Default, Deserialize)]
pub struct QuotaLimitResponse {
    #[serde(default)]
    pub data: QuotaLimitData,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuotaLimitData {
    #[serde(default)]
    pub limits: Vec<UsageRecord>,
}

#[derive(Debug, Deserialize)]
pub struct UsageRecord {
    /// Untyped: a missing or non-string `type` simply never matches.
    #[serde(rename = "type", default)]
    pub kind: serde_json::Value,
    pub percentage: Option<serde_json::Number>,
}

impl UsageRecord {
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.as_str() == Some(kind)
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
