use crate::usage_paths;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

/// Returns true if debug logging is enabled via GLM_USAGE_DEBUG=1
pub fn is_debug_enabled() -> bool {
    debug_flag_set(env::var("GLM_USAGE_DEBUG").ok().as_deref())
}

fn debug_flag_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Debug logger that writes to /tmp/glm-usage-debug.log when GLM_USAGE_DEBUG=1.
///
/// Entries are buffered for the lifetime of one lookup and flushed on drop, so
/// a single invocation lands in the log as one contiguous block.
pub struct DebugLogger {
    enabled: bool,
    start: Instant,
    entries: Vec<String>,
}

impl DebugLogger {
    pub fn new() -> Self {
        Self::with_enabled(is_debug_enabled())
    }

    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            start: Instant::now(),
            entries: Vec::new(),
        }
    }

    pub fn log(&mut self, message: &str) {
        if self.enabled {
            let elapsed_ms = self.start.elapsed().as_millis();
            self.entries.push(format!("[+{:06}ms] {}", elapsed_ms, message));
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn flush_to_file(&self) {
        if !self.enabled || self.entries.is_empty() {
            return;
        }
        let log_path = usage_paths::debug_log_path();
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(file, "\n=== Quota Lookup {} ===", timestamp);
            for entry in &self.entries {
                let _ = writeln!(file, "{}", entry);
            }
        }
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DebugLogger {
    fn drop(&mut self) {
        self.flush_to_file();
    }
}
