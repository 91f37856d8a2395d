//! Quota percentage lookup for status-line display.
//!
//! - `credentials` resolves the token and endpoint from local settings files
//! - `api_client` queries the quota-limit endpoint once per refresh
//! - `store` persists the last display value with its write time
//! - `cache` ties them together behind a 60 second freshness window

pub mod api_client;
pub mod cache;
pub mod credentials;
pub mod store;
pub mod types;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
