//! Credential lookup across the opencode and Claude settings files.

use super::types::{CredentialSet, SettingsFile, AUTH_TOKEN_KEY, BASE_URL_KEY};
use crate::usage_paths;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Anything that can produce a credential set for a lookup.
pub trait CredentialProvider {
    fn resolve(&self) -> CredentialSet;
}

/// One settings document that may carry an `env` block.
pub struct SettingsSource {
    path: PathBuf,
}

impl SettingsSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns credentials if the document has a non-empty `env` object.
    ///
    /// Unreadable or malformed documents are reported as absent.
    pub fn load(&self) -> Option<CredentialSet> {
        match self.read() {
            Ok(creds) => creds,
            Err(e) => {
                tracing::debug!("Skipping settings source {}: {:#}", self.path.display(), e);
                None
            }
        }
    }

    fn read(&self) -> Result<Option<CredentialSet>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        parse_settings(&content)
    }
}

/// Extracts the token and base URL from a settings document.
///
/// Returns `None` when there is no `env` object or it is empty. Missing or
/// non-string keys inside a present `env` resolve to empty strings.
pub fn parse_settings(content: &str) -> Result<Option<CredentialSet>> {
    let settings: SettingsFile =
        serde_json::from_str(content).context("Failed to parse settings")?;

    let Some(env) = settings.env.filter(|env| !env.is_empty()) else {
        return Ok(None);
    };

    let field = |key: &str| {
        env.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    Ok(Some(CredentialSet {
        auth_token: field(AUTH_TOKEN_KEY),
        base_url: field(BASE_URL_KEY),
    }))
}

/// Ordered settings sources; the first one with an `env` block wins.
pub struct CredentialResolver {
    sources: Vec<SettingsSource>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<SettingsSource>) -> Self {
        Self { sources }
    }

    /// opencode settings first, then Claude settings.
    pub fn from_default_locations() -> Self {
        let paths = [
            usage_paths::opencode_settings_path(),
            usage_paths::claude_settings_path(),
        ];
        let sources = paths
            .into_iter()
            .filter_map(|path| path.ok())
            .map(SettingsSource::new)
            .collect();
        Self::new(sources)
    }
}

impl CredentialProvider for CredentialResolver {
    fn resolve(&self) -> CredentialSet {
        self.sources
            .iter()
            .find_map(SettingsSource::load)
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
