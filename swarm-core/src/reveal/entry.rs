//! Reveal entry domain types: ids, states, and the transition audit record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::Region;

/// Opaque handle for a registered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RevealId(pub u64);

impl fmt::Display for RevealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reveal#{}", self.0)
    }
}

/// Lifecycle of a registered block.
///
/// Transitions are one-way: `Pending → Triggered → Revealed`. `Revealed` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    /// Waiting for the block to cross its visibility threshold.
    Pending,
    /// Threshold crossed at `at_ms`; reveal scheduled after the stagger delay.
    Triggered { at_ms: u64 },
    /// Shown. Never reverts.
    Revealed,
}

impl RevealState {
    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealState::Revealed)
    }

    /// Still needs viewport evaluation.
    pub fn is_observed(&self) -> bool {
        matches!(self, RevealState::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RevealState::Pending => "Pending",
            RevealState::Triggered { .. } => "Triggered",
            RevealState::Revealed => "Revealed",
        }
    }
}

impl fmt::Display for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A block registered with the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealEntry {
    pub id: RevealId,
    pub region: Region,
    /// Fraction of the region's area that must be inside the viewport, in (0, 1].
    pub threshold: f64,
    /// Delay between trigger and reveal.
    pub stagger_ms: u64,
    pub state: RevealState,
}

impl RevealEntry {
    /// Time at which a triggered entry becomes revealed.
    pub fn reveal_due_at(&self) -> Option<u64> {
        match self.state {
            RevealState::Triggered { at_ms } => Some(at_ms.saturating_add(self.stagger_ms)),
            _ => None,
        }
    }
}

/// One recorded state change, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealTransition {
    pub id: RevealId,
    pub from: RevealState,
    pub to: RevealState,
    pub at_ms: u64,
}
