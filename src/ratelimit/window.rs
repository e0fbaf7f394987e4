//! Fixed-window request counter keyed by identifier.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    /// Time until the identifier's window resets. Set only on denial.
    pub retry_after: Option<Duration>,
}

impl Decision {
    const ALLOWED: Decision = Decision {
        allowed: true,
        retry_after: None,
    };

    /// Retry-after rounded up to whole seconds, never zero for a denial.
    pub fn retry_after_secs(&self) -> u64 {
        match self.retry_after {
            Some(d) => {
                let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
                secs.max(1)
            }
            None => 0,
        }
    }
}

/// A fixed-window counter map: "is this identifier allowed one more action
/// right now?"
///
/// Entries are created lazily on first request, replaced in place when their
/// window has expired, and swept periodically. The read-modify-write on an
/// entry happens under the map mutex, so two concurrent requests can never
/// both take the last slot in a window.
pub struct RateWindow {
    entries: Mutex<HashMap<String, WindowEntry>>,
    window: Duration,
    max_requests: u32,
}

impl RateWindow {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            window,
            max_requests,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Check and count one request for `identifier` at the current instant.
    pub fn check(&self, identifier: &str) -> Decision {
        self.check_at(identifier, Instant::now())
    }

    /// Check and count one request at an explicit instant.
    ///
    /// An entry whose `reset_at` lies strictly in the past is replaced with
    /// a fresh window, not incremented.
    pub fn check_at(&self, identifier: &str, now: Instant) -> Decision {
        let mut entries = self.entries.lock().expect("rate window mutex poisoned");

        match entries.entry(identifier.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if now > entry.reset_at {
                    // Expired window: replace, don't continue the old count.
                    entry.count = 1;
                    entry.reset_at = now + self.window;
                    Decision::ALLOWED
                } else if entry.count >= self.max_requests {
                    Decision {
                        allowed: false,
                        retry_after: Some(entry.reset_at.saturating_duration_since(now)),
                    }
                } else {
                    entry.count += 1;
                    Decision::ALLOWED
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(WindowEntry {
                    count: 1,
                    reset_at: now + self.window,
                });
                Decision::ALLOWED
            }
        }
    }

    /// Remove entries whose window has expired. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().expect("rate window mutex poisoned");
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.reset_at);
        before - entries.len()
    }

    /// Number of tracked identifiers (expired entries included until swept).
    pub fn tracked(&self) -> usize {
        self.entries.lock().expect("rate window mutex poisoned").len()
    }
}
