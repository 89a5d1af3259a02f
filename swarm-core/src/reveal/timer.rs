//! Cancellable deferred timers keyed by reveal id.
//!
//! One timer per id at most. Timers fire in deadline order; ties fire in the
//! order they were scheduled.

use std::collections::{BTreeMap, HashMap};

use super::entry::RevealId;

#[derive(Debug, Default)]
pub struct TimerQueue {
    /// (deadline, sequence) → id.
    queue: BTreeMap<(u64, u64), RevealId>,
    /// id → key into `queue`, for cancellation.
    index: HashMap<RevealId, (u64, u64)>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `id` to fire at `deadline_ms`, replacing any timer it already has.
    pub fn schedule(&mut self, id: RevealId, deadline_ms: u64) {
        self.cancel(id);
        let key = (deadline_ms, self.next_seq);
        self.next_seq += 1;
        self.queue.insert(key, id);
        self.index.insert(id, key);
    }

    /// Cancel the timer for `id`. Returns false if none was scheduled.
    pub fn cancel(&mut self, id: RevealId) -> bool {
        match self.index.remove(&id) {
            Some(key) => {
                self.queue.remove(&key);
                true
            }
            None => false,
        }
    }

    /// Remove and return every timer due at or before `now_ms`, earliest first.
    pub fn pop_due(&mut self, now_ms: u64) -> Vec<(RevealId, u64)> {
        let mut fired = Vec::new();
        while let Some((&(deadline, seq), &id)) = self.queue.iter().next() {
            if deadline > now_ms {
                break;
            }
            self.queue.remove(&(deadline, seq));
            self.index.remove(&id);
            fired.push((id, deadline));
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(deadline, _)| deadline)
    }

    pub fn is_scheduled(&self, id: RevealId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
