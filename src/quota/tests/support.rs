//! Shared fakes for quota tests: an in-memory cache store, counting
//! credential and fetch doubles, and one-shot loopback HTTP servers.

use super::api_client::QuotaFetcher;
use super::credentials::CredentialProvider;
use super::store::CacheStore;
use super::types::{CacheEntry, CredentialSet};
use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

/// Cache store backed by memory; writes are stamped with `write_time`.
pub struct MemoryCacheStore {
    entry: RefCell<Option<CacheEntry>>,
    write_time: SystemTime,
    fail_reads: bool,
    fail_writes: bool,
    writes: Cell<usize>,
}

impl MemoryCacheStore {
    pub fn empty(write_time: SystemTime) -> Self {
        Self {
            entry: RefCell::new(None),
            write_time,
            fail_reads: false,
            fail_writes: false,
            writes: Cell::new(0),
        }
    }

    pub fn with_entry(value: &str, modified: SystemTime, write_time: SystemTime) -> Self {
        let store = Self::empty(write_time);
        *store.entry.borrow_mut() = Some(CacheEntry {
            value: value.to_string(),
            modified,
        });
        store
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn value(&self) -> Option<String> {
        self.entry.borrow().as_ref().map(|e| e.value.clone())
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl CacheStore for MemoryCacheStore {
    fn read_entry(&self) -> Result<Option<CacheEntry>> {
        if self.fail_reads {
            bail!("simulated read failure");
        }
        Ok(self.entry.borrow().clone())
    }

    fn write_entry(&self, value: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        if self.fail_writes {
            bail!("simulated write failure");
        }
        *self.entry.borrow_mut() = Some(CacheEntry {
            value: value.to_string(),
            modified: self.write_time,
        });
        Ok(())
    }
}

/// Returns a fixed credential set and counts how often it was asked.
pub struct StaticCredentials {
    credentials: CredentialSet,
    calls: Cell<usize>,
}

impl StaticCredentials {
    pub fn new(auth_token: &str, base_url: &str) -> Self {
        Self {
            credentials: CredentialSet {
                auth_token: auth_token.to_string(),
                base_url: base_url.to_string(),
            },
            calls: Cell::new(0),
        }
    }

    pub fn complete() -> Self {
        Self::new("token", "https://api.example.com/api/anthropic")
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl CredentialProvider for StaticCredentials {
    fn resolve(&self) -> CredentialSet {
        self.calls.set(self.calls.get() + 1);
        self.credentials.clone()
    }
}

/// Fetch double that replays a scripted result and records requested kinds.
pub struct ScriptedFetcher {
    result: std::result::Result<String, String>,
    kinds: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn succeeding(value: &str) -> Self {
        Self {
            result: Ok(value.to_string()),
            kinds: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            kinds: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.kinds.borrow().len()
    }

    pub fn kinds(&self) -> Vec<String> {
        self.kinds.borrow().clone()
    }
}

impl QuotaFetcher for ScriptedFetcher {
    fn fetch_percentage(&self, _credentials: &CredentialSet, kind: &str) -> Result<String> {
        self.kinds.borrow_mut().push(kind.to_string());
        match &self.result {
            Ok(value) => Ok(value.clone()),
            Err(message) => bail!("{}", message),
        }
    }
}

/// Serves exactly one HTTP response on a loopback port.
///
/// Returns a base URL (with a path that the client must discard) and a handle
/// yielding the raw request head that was received.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            request.push_str(&line);
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });

    (format!("http://127.0.0.1:{}/api/anthropic", port), handle)
}

/// Accepts one connection and never answers; the handle finishes once the
/// client closes the socket, or after five seconds at most.
pub fn serve_silently() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let mut buf = [0u8; 1024];
        while let Ok(n) = stream.read(&mut buf) {
            if n == 0 {
                break;
            }
        }
    });

    (format!("http://127.0.0.1:{}/api/anthropic", port), handle)
}

/// A loopback URL on which nothing is listening.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/v1", port)
}
