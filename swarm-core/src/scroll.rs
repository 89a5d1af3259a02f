//! Process-wide scroll position with a single writer and many readers.
//!
//! The scroll observer owns the only `ScrollWriter`; navigation chrome and
//! anything else that reacts to scroll position hold cheap `ScrollReader`
//! clones. The offset is stored as `f64` bits in an atomic, so readers never
//! block the writer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Offset past which the navigation bar switches to its scrolled styling.
pub const NAV_SCROLL_THRESHOLD: f64 = 60.0;

/// Create a linked writer/reader pair starting at offset 0.
pub fn scroll_signal() -> (ScrollWriter, ScrollReader) {
    let cell = Arc::new(AtomicU64::new(0f64.to_bits()));
    (
        ScrollWriter { cell: cell.clone() },
        ScrollReader { cell },
    )
}

/// The single writer. Not `Clone`.
#[derive(Debug)]
pub struct ScrollWriter {
    cell: Arc<AtomicU64>,
}

impl ScrollWriter {
    /// Publish a new vertical offset. Negative and non-finite values clamp to 0.
    pub fn set(&self, offset: f64) {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        self.cell.store(offset.to_bits(), Ordering::Release);
    }

    pub fn reader(&self) -> ScrollReader {
        ScrollReader {
            cell: self.cell.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollReader {
    cell: Arc<AtomicU64>,
}

impl ScrollReader {
    pub fn offset(&self) -> f64 {
        f64::from_bits(self.cell.load(Ordering::Acquire))
    }

    /// True once the page has scrolled past the navigation threshold.
    pub fn is_scrolled(&self) -> bool {
        self.offset() > NAV_SCROLL_THRESHOLD
    }
}
