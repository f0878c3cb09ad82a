//! Monotonic request tickets for stale-response suppression.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out strictly increasing tickets and remembers the newest one.
///
/// A response is applied only if its ticket is still the newest when it
/// completes; anything overtaken by a later request is discarded no matter
/// which finished first.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: AtomicU64,
    current: AtomicU64,
}

/// Proof of one started request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    id: u64,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, making it the current one.
    pub fn begin(&self) -> Ticket {
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        self.current.store(id, Ordering::Release);
        Ticket { id }
    }

    /// True while no later request has begun.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.id
    }
}
