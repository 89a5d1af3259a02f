//! Reveal controller: registry and state machine for scroll-driven reveals.
//!
//! The controller is the single owner of every entry's `RevealState`. The host
//! (a browser shim, a terminal loop, a test) feeds it two kinds of events:
//! - viewport changes (`on_viewport`), the observation callback
//! - clock ticks (`advance`), which fire deferred stagger timers
//!
//! Every pending entry is re-evaluated on each viewport change, so callers
//! never re-check visibility themselves. Entries leave observation as soon as
//! they trigger; reveal then happens `stagger_ms` later no matter where the
//! viewport has moved in the meantime.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use super::entry::{RevealEntry, RevealId, RevealState, RevealTransition};
use super::geometry::{visible_fraction, Region, Viewport};
use super::timer::TimerQueue;

/// Errors from reveal registry operations.
#[derive(Debug, Error, PartialEq)]
pub enum RevealError {
    #[error("threshold must lie in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("{0} is not registered")]
    UnknownEntry(RevealId),
}

/// Whether the environment can observe viewport intersection at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObservationSupport {
    #[default]
    Available,
    /// No observation primitive. Every entry reveals on registration.
    Unavailable,
}

pub struct RevealController {
    support: ObservationSupport,
    viewport: Viewport,
    now_ms: u64,
    entries: HashMap<RevealId, RevealEntry>,
    timers: TimerQueue,
    /// Complete audit trail of every state transition since the last drain.
    transitions: Vec<RevealTransition>,
    next_id: u64,
    fail_open_logged: bool,
}

impl RevealController {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_support(viewport, ObservationSupport::Available)
    }

    pub fn with_support(viewport: Viewport, support: ObservationSupport) -> Self {
        Self {
            support,
            viewport,
            now_ms: 0,
            entries: HashMap::new(),
            timers: TimerQueue::new(),
            transitions: Vec::new(),
            next_id: 1,
            fail_open_logged: false,
        }
    }

    // ── Public API ─────────────────────────────────────────────────────

    /// Register a block and start observing it immediately.
    ///
    /// The entry is evaluated against the current viewport inside this call,
    /// so a block mounted on-screen triggers without waiting for a scroll.
    pub fn register(
        &mut self,
        region: Region,
        threshold: f64,
        stagger_ms: u64,
    ) -> Result<RevealId, RevealError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(RevealError::InvalidThreshold(threshold));
        }

        let id = RevealId(self.next_id);
        self.next_id += 1;

        self.entries.insert(
            id,
            RevealEntry {
                id,
                region,
                threshold,
                stagger_ms,
                state: RevealState::Pending,
            },
        );

        if self.support == ObservationSupport::Unavailable {
            if !self.fail_open_logged {
                warn!("viewport observation unavailable; revealing all blocks immediately");
                self.fail_open_logged = true;
            }
            self.transition(id, RevealState::Revealed);
        } else {
            self.evaluate(id);
        }

        Ok(id)
    }

    /// Stop observing `id` and cancel its pending reveal, if any.
    ///
    /// Unknown or already-unregistered ids are a no-op. Returns whether the id
    /// was registered.
    pub fn unregister(&mut self, id: RevealId) -> bool {
        self.timers.cancel(id);
        self.entries.remove(&id).is_some()
    }

    /// Whether `id` has reached `Revealed`. Unknown ids read as not revealed.
    pub fn is_revealed(&self, id: RevealId) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|entry| entry.state.is_revealed())
    }

    pub fn state(&self, id: RevealId) -> Option<RevealState> {
        self.entries.get(&id).map(|entry| entry.state)
    }

    pub fn entry(&self, id: RevealId) -> Option<&RevealEntry> {
        self.entries.get(&id)
    }

    /// Report a scroll or resize. Due timers fire first, then every pending
    /// entry is re-evaluated against the new viewport.
    pub fn on_viewport(&mut self, viewport: Viewport, now_ms: u64) {
        self.advance(now_ms);
        self.viewport = viewport;

        let mut pending: Vec<RevealId> = self
            .entries
            .values()
            .filter(|entry| entry.state.is_observed())
            .map(|entry| entry.id)
            .collect();
        pending.sort();

        for id in pending {
            self.evaluate(id);
        }
    }

    /// Move the region of a mounted block (layout change) and re-evaluate it.
    pub fn set_region(&mut self, id: RevealId, region: Region) -> Result<(), RevealError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(RevealError::UnknownEntry(id))?;
        entry.region = region;
        self.evaluate(id);
        Ok(())
    }

    /// Move many regions and install a new viewport in one step (page reflow).
    ///
    /// No entry is evaluated until every region has moved and the new viewport
    /// is in place. Fails without changing anything if any id is unknown.
    pub fn relayout(
        &mut self,
        regions: &[(RevealId, Region)],
        viewport: Viewport,
        now_ms: u64,
    ) -> Result<(), RevealError> {
        if let Some(&(id, _)) = regions.iter().find(|(id, _)| !self.entries.contains_key(id)) {
            return Err(RevealError::UnknownEntry(id));
        }
        for &(id, region) in regions {
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.region = region;
            }
        }
        self.on_viewport(viewport, now_ms);
        Ok(())
    }

    /// Advance the clock to `now_ms`, firing every stagger timer that is due.
    ///
    /// Time never moves backwards; an earlier `now_ms` is ignored. Returns the
    /// ids revealed by this call in firing order.
    pub fn advance(&mut self, now_ms: u64) -> Vec<RevealId> {
        self.now_ms = self.now_ms.max(now_ms);

        let mut revealed = Vec::new();
        for (id, _deadline) in self.timers.pop_due(self.now_ms) {
            let triggered = matches!(
                self.entries.get(&id).map(|entry| entry.state),
                Some(RevealState::Triggered { .. })
            );
            if triggered {
                self.transition(id, RevealState::Revealed);
                revealed.push(id);
            }
        }
        revealed
    }

    /// Earliest pending stagger deadline, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn support(&self) -> ObservationSupport {
        self.support
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries still waiting for their threshold.
    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.state.is_observed())
            .count()
    }

    /// Transitions recorded since the last drain.
    pub fn transitions(&self) -> &[RevealTransition] {
        &self.transitions
    }

    /// Take the recorded transitions, leaving the log empty.
    pub fn drain_transitions(&mut self) -> Vec<RevealTransition> {
        std::mem::take(&mut self.transitions)
    }

    // ── Internal ───────────────────────────────────────────────────────

    /// Check a pending entry against the current viewport.
    fn evaluate(&mut self, id: RevealId) {
        let Some(entry) = self.entries.get(&id) else {
            return;
        };
        if !entry.state.is_observed() {
            return;
        }

        let fraction = visible_fraction(&entry.region, &self.viewport);
        if fraction < entry.threshold {
            return;
        }

        let stagger_ms = entry.stagger_ms;
        let now = self.now_ms;
        self.transition(id, RevealState::Triggered { at_ms: now });

        if stagger_ms == 0 {
            self.transition(id, RevealState::Revealed);
        } else {
            self.timers.schedule(id, now.saturating_add(stagger_ms));
        }
    }

    fn transition(&mut self, id: RevealId, to: RevealState) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        let from = entry.state;
        debug_assert!(!from.is_revealed(), "revealed is terminal");
        entry.state = to;

        debug!(%id, from = %from, to = %to, at_ms = self.now_ms, "reveal transition");
        self.transitions.push(RevealTransition {
            id,
            from,
            to,
            at_ms: self.now_ms,
        });
    }
}
