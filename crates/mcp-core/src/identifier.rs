//! Monotonic request-id generation.
//!
//! spec.md §4.7: "Request-id generation produces strings unique within the
//! server process lifetime." Per the design note in spec.md §9, this
//! generator is used only to *label* notifications the engine emits itself
//! (e.g. correlating a streaming task's internal bookkeeping); it is never
//! used to fabricate an `id` for an inbound message that omitted one — doing
//! that would silently convert a notification into a request.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Generates unique, monotonically increasing request identifiers.
///
/// Combines a process-lifetime UUID prefix with a per-generator atomic
/// counter, matching the teacher's reliance on `Uuid::new_v4` for
/// `RequestContext::new()` (`turbomcp-core/src/context/request.rs`) while
/// adding a counter so ids sort and are cheap to generate on a hot path.
#[derive(Debug)]
pub struct RequestIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl RequestIdGenerator {
    /// Create a new generator with a fresh process-lifetime prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: Uuid::new_v4().simple().to_string(),
            counter: AtomicU64::new(0),
        }
    }

    /// Generate the next unique identifier.
    pub fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
