//! Identifier allocation
//!
//! Participant and order identifiers are monotonic counters. They live in an
//! explicit [`IdContext`] owned by whoever builds a simulation, so two runs
//! (or two tests) never share counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Default first identifier handed out by a fresh allocator
pub const DEFAULT_FIRST_ID: u64 = 1;

/// Monotonic identifier allocator
#[derive(Debug)]
pub struct IdAllocator {
    first: u64,
    next: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator starting at [`DEFAULT_FIRST_ID`]
    pub fn new() -> Self {
        Self::starting_at(DEFAULT_FIRST_ID)
    }

    /// Create an allocator whose first identifier is `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            first,
            next: AtomicU64::new(first),
        }
    }

    /// Hand out the next identifier
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The identifier the next call to [`next_id`](Self::next_id) will return
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// Number of identifiers handed out since creation or the last reset
    pub fn issued(&self) -> u64 {
        self.peek() - self.first
    }

    /// Rewind to the first identifier
    pub fn reset(&self) {
        self.next.store(self.first, Ordering::Relaxed);
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped set of allocators for one simulation
#[derive(Debug, Default)]
pub struct IdContext {
    pub participants: IdAllocator,
    pub orders: IdAllocator,
}

impl IdContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every allocator in the context
    pub fn reset(&self) {
        self.participants.reset();
        self.orders.reset();
    }
}
