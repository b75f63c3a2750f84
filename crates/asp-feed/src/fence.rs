//! Per-key request fencing.
//!
//! Every request takes a ticket from one monotonic counter shared by all keys,
//! so tickets on different keys can be ordered too. Responses
//! complete their ticket; one that arrives after a newer ticket for the same
//! key has completed is stale and must not touch local state.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: String,
    seq: u64,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct Fence {
    next: u64,
    issued: HashMap<String, u64>,
    completed: HashMap<String, u64>,
}

impl Fence {
    pub fn begin(&mut self, key: impl Into<String>) -> Ticket {
        let key = key.into();
        self.next += 1;
        self.issued.insert(key.clone(), self.next);
        Ticket { key, seq: self.next }
    }

    /// Record a response. Returns `false` if a newer ticket already completed.
    pub fn complete(&mut self, ticket: &Ticket) -> bool {
        let newest = self.completed.entry(ticket.key.clone()).or_insert(0);
        if ticket.seq < *newest {
            return false;
        }
        *newest = ticket.seq;
        true
    }

    /// `true` if no request for this key was issued after `ticket`.
    pub fn is_latest(&self, ticket: &Ticket) -> bool {
        self.issued.get(&ticket.key).copied() == Some(ticket.seq)
    }

    /// `true` if a request for `key` was issued after `ticket`.
    pub fn issued_after(&self, key: &str, ticket: &Ticket) -> bool {
        self.issued.get(key).is_some_and(|&seq| seq > ticket.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_are_monotonic_across_keys() {
        let mut fence = Fence::default();
        let a1 = fence.begin("question:q1");
        let a2 = fence.begin("question:q1");
        let b1 = fence.begin("question:q2");
        assert_eq!((a1.seq(), a2.seq(), b1.seq()), (1, 2, 3));
        assert_eq!(a2.key(), "question:q1");
    }

    #[test]
    fn issued_after_compares_other_keys() {
        let mut fence = Fence::default();
        let all = fence.begin("activity:*");
        assert!(!fence.issued_after("activity:a1", &all));

        let one = fence.begin("activity:a1");
        assert!(fence.issued_after("activity:a1", &all));
        assert!(!fence.issued_after("activity:*", &one));
    }

    #[test]
    fn older_response_after_newer_is_stale() {
        let mut fence = Fence::default();
        let first = fence.begin("k");
        let second = fence.begin("k");

        assert!(fence.complete(&second));
        assert!(!fence.complete(&first));
    }

    #[test]
    fn in_order_responses_both_complete() {
        let mut fence = Fence::default();
        let first = fence.begin("k");
        let second = fence.begin("k");

        assert!(fence.complete(&first));
        assert!(fence.complete(&second));
    }

    #[test]
    fn latest_tracks_issue_not_completion() {
        let mut fence = Fence::default();
        let first = fence.begin("k");
        assert!(fence.is_latest(&first));
        let _second = fence.begin("k");
        assert!(!fence.is_latest(&first));
    }
}
