//! Shared test helpers: a scripted in-memory geocoding provider.

#![allow(dead_code)]

use async_trait::async_trait;
use batch_geocoder::transport::TransportError;
use batch_geocoder::{Coordinate, GeocodeProvider, LookupError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
pub enum Script {
    Resolve(Coordinate),
    NoResult,
    Fail,
    /// Connection-level failure.
    Transport,
}

/// Provider driven by a per-address script. Unknown addresses resolve to a
/// coordinate derived from the address text.
pub struct ScriptedProvider {
    scripts: HashMap<String, Script>,
    fallback: Option<Script>,
    delay: Duration,
    calls: Mutex<Vec<String>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: None,
            delay: Duration::from_millis(5),
            calls: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    /// Every address is rejected with a provider status error.
    pub fn failing() -> Self {
        Self {
            fallback: Some(Script::Fail),
            ..Self::new()
        }
    }

    /// Every address fails before a response arrives.
    pub fn unreachable() -> Self {
        Self {
            fallback: Some(Script::Transport),
            ..Self::new()
        }
    }

    pub fn with(mut self, address: &str, script: Script) -> Self {
        self.scripts.insert(address.to_string(), script);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, address: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|a| *a == address).count()
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

pub fn coord_for(address: &str) -> Coordinate {
    let seed = address.len() as f64;
    Coordinate::new(seed, -seed, format!("{address}, USA"))
}

#[async_trait]
impl GeocodeProvider for ScriptedProvider {
    async fn lookup(&self, address: &str) -> Result<Coordinate, LookupError> {
        self.calls.lock().unwrap().push(address.to_string());
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        match (self.scripts.get(address), &self.fallback) {
            (Some(Script::Resolve(c)), _) => Ok(c.clone()),
            (Some(Script::NoResult), _) => Err(LookupError::NoResult),
            (Some(Script::Fail), _) => Err(LookupError::Http { status: 503 }),
            (Some(Script::Transport), _) | (None, Some(Script::Transport)) => Err(
                LookupError::Transport(TransportError::Other("connection refused".into())),
            ),
            (None, Some(Script::Fail)) => Err(LookupError::Status {
                status: "REQUEST_DENIED".into(),
                message: Some("The provided API key is invalid.".into()),
            }),
            (None, _) => Ok(coord_for(address)),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn addresses(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{} Main St, Springfield", i + 1)).collect()
}
