//! Sources for the local part of an event UID.
//!
//! The full UID is `<local part>@<organizer domain>`. Only the local part
//! comes from here; the domain is derived from the organizer at render time.

use std::sync::atomic::{AtomicU64, Ordering};

/// Produces the local part of a UID for each newly constructed event.
pub trait UidSource {
    fn next_local_part(&self) -> String;
}

/// Random v4 UUID in simple (undashed) hex form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl UidSource for UuidSource {
    fn next_local_part(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Monotonic counter: `<prefix>-1`, `<prefix>-2`, ...
///
/// Safe to share between threads.
#[derive(Debug)]
pub struct CounterSource {
    prefix: String,
    next: AtomicU64,
}

impl CounterSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        CounterSource {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl UidSource for CounterSource {
    fn next_local_part(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

/// Always hands out the same token.
#[derive(Debug, Clone)]
pub struct FixedSource(pub String);

impl UidSource for FixedSource {
    fn next_local_part(&self) -> String {
        self.0.clone()
    }
}
