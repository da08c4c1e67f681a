//! Identifier generation.
//!
//! Project and step ids are opaque strings assigned once at creation.
//! Generation goes through the [`IdSource`] trait so the strategy is a
//! collaborator rather than a hard-coded clock read, and so tests get
//! predictable ids.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh unique identifiers.
pub trait IdSource {
    /// Produce the next identifier. Never returns the same value twice
    /// from one source.
    fn next_id(&self) -> String;
}

/// Production id source backed by UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Test double producing `prefix-1`, `prefix-2`, ...
#[derive(Debug)]
pub struct SequentialSource {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialSource {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdSource for SequentialSource {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_source_produces_unique_ids() {
        let ids = UuidSource;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_sequential_source_counts_up() {
        let ids = SequentialSource::new("step");
        assert_eq!(ids.next_id(), "step-1");
        assert_eq!(ids.next_id(), "step-2");
        assert_eq!(ids.next_id(), "step-3");
    }
}
