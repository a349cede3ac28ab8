//! Order display-number allocation
//!
//! Numbers follow the `ORD-<year>-<seq>` display format and are unique per
//! allocator instance. Persistence of the counter across restarts is the
//! store's concern; the allocator can be seeded from the highest persisted
//! sequence on startup.

use chrono::{Datelike, Local};
use std::sync::atomic::{AtomicU64, Ordering};

/// Sequential allocator for human-readable order numbers
#[derive(Debug)]
pub struct OrderNumberAllocator {
    counter: AtomicU64,
}

impl OrderNumberAllocator {
    /// Allocator starting at sequence 1
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Allocator seeded with the last issued sequence number
    pub fn starting_at(last_issued: u64) -> Self {
        Self {
            counter: AtomicU64::new(last_issued),
        }
    }

    /// Generate the next order number, e.g. `ORD-2025-0042`
    pub fn next(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("ORD-{}-{:04}", Local::now().year(), seq)
    }
}

impl Default for OrderNumberAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_format() {
        let allocator = OrderNumberAllocator::new();
        let number = allocator.next();
        let year = Local::now().year();
        assert_eq!(number, format!("ORD-{year}-0001"));
    }

    #[test]
    fn test_sequence_is_unique_and_monotonic() {
        let allocator = OrderNumberAllocator::starting_at(41);
        assert_eq!(&allocator.next()[9..], "0042");
        let mut seen = HashSet::new();
        for _ in 0..100 {
            assert!(seen.insert(allocator.next()));
        }
    }
}
