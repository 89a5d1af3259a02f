//! Scroll-driven progressive reveal.
//!
//! Each mounted block registers a region, a visibility threshold, and a stagger
//! delay. The controller moves it through `Pending → Triggered → Revealed`
//! exactly once; the rendering layer reads `is_revealed` to pick its styling.

pub mod controller;
pub mod entry;
pub mod geometry;
pub mod timer;

pub use controller::{ObservationSupport, RevealController, RevealError};
pub use entry::{RevealEntry, RevealId, RevealState, RevealTransition};
pub use geometry::{visible_fraction, Region, Viewport};

/// Default fraction of a block that must be on screen before it triggers.
pub const DEFAULT_THRESHOLD: f64 = 0.12;

/// Stagger step between consecutive architecture cards.
pub const CARD_STAGGER_MS: u64 = 75;

/// Delay applied to the projection table block.
pub const TABLE_STAGGER_MS: u64 = 100;

/// Delay applied to the breakeven card row.
pub const BREAKEVEN_STAGGER_MS: u64 = 140;

/// Stagger for the `index`-th card in a grid.
pub fn card_stagger(index: usize) -> u64 {
    CARD_STAGGER_MS * index as u64
}
