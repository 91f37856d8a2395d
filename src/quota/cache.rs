//! Read-through cache in front of the quota endpoint.

use super::api_client::{QuotaClient, QuotaFetcher};
use super::credentials::{CredentialProvider, CredentialResolver};
use super::store::{CacheStore, FileCacheStore};
use super::types::LookupOutcome;
use crate::debug_log::DebugLogger;
use std::time::{Duration, SystemTime};

/// Entries younger than this are served without contacting the endpoint.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

pub struct QuotaCache<S, R, F> {
    store: S,
    resolver: R,
    fetcher: F,
    kind: String,
}

impl QuotaCache<FileCacheStore, CredentialResolver, QuotaClient> {
    /// Cache file in the temp dir, settings from the home directory, live HTTP.
    pub fn with_defaults(kind: &str) -> Self {
        Self::new(
            FileCacheStore::at_default_location(kind),
            CredentialResolver::from_default_locations(),
            QuotaClient::new(),
            kind,
        )
    }
}

impl<S: CacheStore, R: CredentialProvider, F: QuotaFetcher> QuotaCache<S, R, F> {
    pub fn new(store: S, resolver: R, fetcher: F, kind: impl Into<String>) -> Self {
        Self {
            store,
            resolver,
            fetcher,
            kind: kind.into(),
        }
    }

    /// Returns the string to show in the status line. Never fails.
    pub fn get_display_value(&self) -> String {
        self.lookup(SystemTime::now()).into_display()
    }

    /// Serves a fresh entry, or refreshes and persists the result.
    ///
    /// The persisted value is the outcome's display string, so failures are
    /// cached as the placeholder for a full TTL as well.
    pub fn lookup(&self, now: SystemTime) -> LookupOutcome {
        let mut logger = DebugLogger::new();

        if let Some(value) = self.fresh_value(now, &mut logger) {
            return LookupOutcome::Fresh(value);
        }

        let outcome = self.refresh(&mut logger);
        match self.store.write_entry(outcome.display()) {
            Ok(()) => logger.log(&format!("Cached {:?}", outcome.display())),
            Err(e) => logger.log(&format!("Cache write failed: {:#}", e)),
        }
        outcome
    }

    fn fresh_value(&self, now: SystemTime, logger: &mut DebugLogger) -> Option<String> {
        match self.store.read_entry() {
            Ok(Some(entry)) => {
                let age = entry.age_at(now);
                if age < CACHE_TTL {
                    logger.log(&format!("Cache hit (age {}ms)", age.as_millis()));
                    Some(entry.value)
                } else {
                    logger.log(&format!("Cache stale (age {}s)", age.as_secs()));
                    None
                }
            }
            Ok(None) => {
                logger.log("No cache entry");
                None
            }
            Err(e) => {
                logger.log(&format!("Cache unreadable: {:#}", e));
                None
            }
        }
    }

    fn refresh(&self, logger: &mut DebugLogger) -> LookupOutcome {
        let credentials = self.resolver.resolve();
        if !credentials.is_complete() {
            logger.log(&format!(
                "Credentials incomplete (token set: {}, base URL set: {})",
                !credentials.auth_token.is_empty(),
                !credentials.base_url.is_empty()
            ));
            return LookupOutcome::Unavailable;
        }

        logger.log(&format!(
            "Fetching {} from {}",
            self.kind, credentials.base_url
        ));
        match self.fetcher.fetch_percentage(&credentials, &self.kind) {
            Ok(value) => {
                logger.log(&format!("Fetched {}", value));
                LookupOutcome::Refreshed(value)
            }
            Err(e) => {
                logger.log(&format!("Fetch failed: {:#}", e));
                LookupOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
