//! Page-space rectangles and the visible-fraction computation.
//!
//! All coordinates are in page space (origin at the top-left of the whole
//! document), so a region keeps its coordinates while the viewport scrolls.

use serde::{Deserialize, Serialize};

/// Bounding box of a registered block in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The currently rendered window onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_x: f64, scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_x,
            scroll_y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Same viewport scrolled vertically to `scroll_y`.
    pub fn scrolled_to(self, scroll_y: f64) -> Self {
        Self { scroll_y, ..self }
    }

    /// Same viewport with a new size (window resize).
    pub fn resized(self, width: f64, height: f64) -> Self {
        Self::new(self.scroll_x, self.scroll_y, width, height)
    }

    fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.scroll_x
            && x <= self.scroll_x + self.width
            && y >= self.scroll_y
            && y <= self.scroll_y + self.height
    }
}

/// Fraction of `region`'s area that currently lies inside `viewport`, in [0, 1].
///
/// A zero-area region counts as fully visible when its origin is inside the
/// viewport (edges included) and as invisible otherwise.
pub fn visible_fraction(region: &Region, viewport: &Viewport) -> f64 {
    let area = region.area();
    if area <= 0.0 {
        return if viewport.contains_point(region.x, region.y) {
            1.0
        } else {
            0.0
        };
    }

    let vp_right = viewport.scroll_x + viewport.width;
    let vp_bottom = viewport.scroll_y + viewport.height;

    // Exact 1.0 for contained regions; `x + w - x` can round below `w`.
    let contained_x = region.x >= viewport.scroll_x && region.right() <= vp_right;
    let contained_y = region.y >= viewport.scroll_y && region.bottom() <= vp_bottom;
    if contained_x && contained_y {
        return 1.0;
    }

    let overlap_w = if contained_x {
        region.width
    } else {
        (region.right().min(vp_right) - region.x.max(viewport.scroll_x)).clamp(0.0, region.width)
    };
    let overlap_h = if contained_y {
        region.height
    } else {
        (region.bottom().min(vp_bottom) - region.y.max(viewport.scroll_y))
            .clamp(0.0, region.height)
    };

    // Per-axis ratios keep a clipped region strictly below 1.0.
    ((overlap_w / region.width) * (overlap_h / region.height)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn fully_inside_is_one() {
        let r = Region::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(visible_fraction(&r, &viewport()), 1.0);
    }

    #[test]
    fn fractional_region_inside_is_exactly_one() {
        // 0.7 + 0.1 - 0.7 rounds below 0.1.
        let r = Region::new(0.0, 0.7, 1000.0, 0.1);
        let vp = Viewport::new(0.0, 0.0, 1200.0, 800.0);
        assert_eq!(visible_fraction(&r, &vp), 1.0);
    }

    #[test]
    fn clipped_region_stays_below_one() {
        let r = Region::new(0.0, 0.7, 1000.0, 0.1);
        let vp = Viewport::new(0.0, 0.75, 1200.0, 800.0);
        let f = visible_fraction(&r, &vp);
        assert!(f < 1.0 && f > 0.0, "f = {f}");
    }

    #[test]
    fn fully_below_is_zero() {
        let r = Region::new(0.0, 150.0, 100.0, 40.0);
        assert_eq!(visible_fraction(&r, &viewport()), 0.0);
    }

    #[test]
    fn half_visible_block() {
        // Top half of the block is inside the viewport.
        let r = Region::new(0.0, 80.0, 100.0, 40.0);
        assert!((visible_fraction(&r, &viewport()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scrolling_moves_the_window() {
        let r = Region::new(0.0, 150.0, 100.0, 40.0);
        let vp = viewport().scrolled_to(100.0);
        assert_eq!(visible_fraction(&r, &vp), 1.0);
    }

    #[test]
    fn block_taller_than_viewport_never_reaches_one() {
        let r = Region::new(0.0, 0.0, 100.0, 400.0);
        let f = visible_fraction(&r, &viewport());
        assert!((f - 0.25).abs() < 1e-12);
    }

    #[test]
    fn zero_area_region_uses_origin() {
        let inside = Region::new(50.0, 50.0, 0.0, 0.0);
        let outside = Region::new(50.0, 500.0, 0.0, 0.0);
        assert_eq!(visible_fraction(&inside, &viewport()), 1.0);
        assert_eq!(visible_fraction(&outside, &viewport()), 0.0);
    }

    #[test]
    fn negative_sizes_are_clamped() {
        let r = Region::new(0.0, 0.0, -5.0, 10.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.area(), 0.0);
    }
}
