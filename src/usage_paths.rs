//! Well-known filesystem locations used by glm-usage.
//!
//! - `~/.config/opencode/opencode.json` - primary settings (`OPENCODE_CONFIG_DIR`)
//! - `~/.claude/settings.json` - fallback settings (`CLAUDE_CONFIG_DIR`)
//! - `/tmp/.glm_usage_cache` - memoized display value (`GLM_USAGE_CACHE_FILE`)
//! - `/tmp/.glm_usage_cache_<KIND>` - memoized value for a non-default kind
//! - `/tmp/glm-usage-debug.log` - opt-in debug log
//!
//! On unix the shared directory is always `/tmp`, regardless of `TMPDIR`, so
//! every caller on the host agrees on the cache location.

use crate::quota::types::DEFAULT_QUERY_KIND;
use anyhow::{Context, Result};
use std::path::PathBuf;

const CACHE_FILENAME: &str = ".glm_usage_cache";
const DEBUG_LOG_FILENAME: &str = "glm-usage-debug.log";

/// Returns the opencode settings path: `~/.config/opencode/opencode.json`
pub fn opencode_settings_path() -> Result<PathBuf> {
    let config_dir = std::env::var("OPENCODE_CONFIG_DIR")
        .map(PathBuf::from)
        .ok()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config").join("opencode")))
        .context("Cannot determine opencode config directory")?;
    Ok(config_dir.join("opencode.json"))
}

/// Returns the Claude settings path: `~/.claude/settings.json`
pub fn claude_settings_path() -> Result<PathBuf> {
    let config_dir = std::env::var("CLAUDE_CONFIG_DIR")
        .map(PathBuf::from)
        .ok()
        .or_else(|| dirs::home_dir().map(|h| h.join(".claude")))
        .context("Cannot determine Claude config directory")?;
    Ok(config_dir.join("settings.json"))
}

/// Directory holding the cache and debug log: `/tmp` on unix.
pub fn shared_tmp_dir() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir()
    }
}

/// Returns the cache file path for a usage kind, shared by every invocation on the host.
///
/// The default kind uses the bare file name; any other kind gets its own file
/// with a `_<KIND>` suffix so entries for different kinds never mix.
pub fn cache_file_path(kind: &str) -> PathBuf {
    let base = std::env::var_os("GLM_USAGE_CACHE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| shared_tmp_dir().join(CACHE_FILENAME));

    if kind == DEFAULT_QUERY_KIND {
        return base;
    }

    let suffix: String = kind
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let mut name = base.file_name().unwrap_or_default().to_os_string();
    name.push(format!("_{}", suffix));
    base.with_file_name(name)
}

/// Returns the debug log path: `/tmp/glm-usage-debug.log`
pub fn debug_log_path() -> PathBuf {
    shared_tmp_dir().join(DEBUG_LOG_FILENAME)
}
