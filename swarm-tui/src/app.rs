//! Application state: single-owner, main-thread only.
//!
//! The page is laid out in terminal cells. One cell row is one unit of page
//! height, so a block's `Region` is measured in rows and columns and the
//! viewport is the visible body of the terminal.

use std::collections::HashMap;

use anyhow::Result;
use ratatui::text::Line;
use tracing::{debug, info};

use swarm_core::projection::{
    position_expected_value, profit_at, BreakevenResult, Horizon, ProjectionAssumptions,
    ProjectionEngine, ProjectionRow,
};
use swarm_core::reveal::{ObservationSupport, Region, RevealController, RevealId, Viewport};
use swarm_core::scroll::{scroll_signal, ScrollReader, ScrollWriter};
use swarm_core::PageConfig;

use crate::page::{page_blocks, BlockSpec};
use crate::ui::sections::block_lines;

/// Pixel height of one terminal row, for the shared scroll signal.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Revealed blocks render dimmed for this long after their reveal.
pub const FADE_MS: u64 = 240;

/// Every computed figure the page shows, derived once from the config.
#[derive(Debug, Clone)]
pub struct ProjectionView {
    pub assumptions: ProjectionAssumptions,
    pub purchase_price: f64,
    pub position_ev: f64,
    pub equity_ev: f64,
    pub monthly_growth: f64,
    pub rows: Vec<ProjectionRow>,
    pub breakeven: Vec<BreakevenResult>,
    pub note_horizon: Horizon,
    pub note_profits: Vec<f64>,
}

impl ProjectionView {
    pub fn from_engine(engine: &ProjectionEngine) -> Self {
        let a = engine.assumptions();
        let note_horizon = a.horizons().first().copied().unwrap_or(Horizon::Month(1));
        let note_profits = a
            .capital_tiers()
            .iter()
            .map(|&tier| profit_at(a, tier, note_horizon))
            .collect();

        Self {
            assumptions: a.clone(),
            purchase_price: engine.purchase_price(),
            position_ev: position_expected_value(a),
            equity_ev: engine.expected_value_per_trade(),
            monthly_growth: engine.monthly_growth_rate(),
            rows: engine.projection(),
            breakeven: engine.breakeven().to_vec(),
            note_horizon,
            note_profits,
        }
    }

    pub fn tiers(&self) -> &[f64] {
        self.assumptions.capital_tiers()
    }
}

/// How a block is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Fading,
    Shown,
}

/// A block positioned on the page, with its pre-rendered lines.
#[derive(Debug, Clone)]
pub struct PlacedBlock {
    pub id: RevealId,
    pub spec: BlockSpec,
    pub region: Region,
    pub lines: Vec<Line<'static>>,
}

impl PlacedBlock {
    pub fn top(&self) -> u16 {
        self.region.y as u16
    }

    pub fn left(&self) -> u16 {
        self.region.x as u16
    }

    pub fn width(&self) -> u16 {
        self.region.width as u16
    }

    pub fn height(&self) -> u16 {
        self.region.height as u16
    }
}

pub struct AppState {
    pub running: bool,
    pub projection: ProjectionView,
    pub blocks: Vec<PlacedBlock>,
    pub reveal: RevealController,
    pub nav: ScrollReader,
    pub offset: u16,
    pub width: u16,
    pub body_height: u16,
    pub page_height: u16,
    pub now_ms: u64,
    scroll: ScrollWriter,
    revealed_at: HashMap<RevealId, u64>,
}

impl AppState {
    pub fn new(
        config: &PageConfig,
        width: u16,
        body_height: u16,
        support: ObservationSupport,
    ) -> Result<Self> {
        let engine = config.engine()?;
        let projection = ProjectionView::from_engine(&engine);
        info!(
            fingerprint = %engine.assumptions().fingerprint(),
            rows = projection.rows.len(),
            "projection computed"
        );

        let specs = page_blocks(projection.tiers().len());
        let (layout, page_height) = layout(&specs, width, &projection);

        let viewport = Viewport::new(0.0, 0.0, f64::from(width), f64::from(body_height));
        let mut reveal = RevealController::with_support(viewport, support);
        let mut blocks = Vec::with_capacity(layout.len());
        for (spec, region, lines) in layout {
            let id = reveal.register(region, spec.threshold, spec.stagger_ms)?;
            blocks.push(PlacedBlock {
                id,
                spec,
                region,
                lines,
            });
        }

        let (scroll, nav) = scroll_signal();
        let mut app = Self {
            running: true,
            projection,
            blocks,
            reveal,
            nav,
            offset: 0,
            width,
            body_height,
            page_height,
            now_ms: 0,
            scroll,
            revealed_at: HashMap::new(),
        };
        app.absorb_transitions();
        Ok(app)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            0.0,
            f64::from(self.offset),
            f64::from(self.width),
            f64::from(self.body_height),
        )
    }

    pub fn max_offset(&self) -> u16 {
        self.page_height.saturating_sub(self.body_height)
    }

    // ── Scrolling ──────────────────────────────────────────────────────

    pub fn scroll_to(&mut self, offset: u16) {
        let offset = offset.min(self.max_offset());
        if offset == self.offset {
            return;
        }
        self.offset = offset;
        self.scroll.set(f64::from(offset) * CELL_HEIGHT_PX);
        self.reveal.on_viewport(self.viewport(), self.now_ms);
        self.absorb_transitions();
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.offset) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll_to(target as u16);
    }

    pub fn page_down(&mut self) {
        self.scroll_by(i32::from(self.body_height.saturating_sub(2).max(1)));
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-i32::from(self.body_height.saturating_sub(2).max(1)));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.max_offset());
    }

    // ── Clock and layout ───────────────────────────────────────────────

    /// Advance the page clock, firing any due reveal timers.
    pub fn tick(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        self.reveal.advance(self.now_ms);
        self.absorb_transitions();
    }

    /// Re-flow the page for a new terminal size. Reveal state is kept.
    pub fn resize(&mut self, width: u16, body_height: u16) -> Result<()> {
        if width == self.width && body_height == self.body_height {
            return Ok(());
        }
        let specs: Vec<BlockSpec> = self.blocks.iter().map(|b| b.spec).collect();
        let (layout, page_height) = layout(&specs, width, &self.projection);

        for (block, (_, region, lines)) in self.blocks.iter_mut().zip(layout) {
            block.region = region;
            block.lines = lines;
        }
        self.width = width;
        self.body_height = body_height;
        self.page_height = page_height;
        self.offset = self.offset.min(self.max_offset());
        self.scroll.set(f64::from(self.offset) * CELL_HEIGHT_PX);
        debug!(width, body_height, page_height, "page re-laid out");

        let regions: Vec<(RevealId, Region)> =
            self.blocks.iter().map(|b| (b.id, b.region)).collect();
        self.reveal.relayout(&regions, self.viewport(), self.now_ms)?;
        self.absorb_transitions();
        Ok(())
    }

    /// Earliest time the frame will change without input.
    pub fn next_wakeup_ms(&self) -> Option<u64> {
        let fade_end = self
            .revealed_at
            .values()
            .map(|&at| at + FADE_MS)
            .filter(|&end| end > self.now_ms)
            .min();
        match (self.reveal.next_deadline(), fade_end) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn visibility(&self, block: &PlacedBlock) -> Visibility {
        if !self.reveal.is_revealed(block.id) {
            return Visibility::Hidden;
        }
        match self.revealed_at.get(&block.id) {
            Some(&at) if self.now_ms < at + FADE_MS => Visibility::Fading,
            _ => Visibility::Shown,
        }
    }

    /// Blocks intersecting the current viewport, in page order.
    pub fn visible_blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        let top = self.offset;
        let bottom = self.offset.saturating_add(self.body_height);
        self.blocks
            .iter()
            .filter(move |b| b.top() < bottom && b.top().saturating_add(b.height()) > top)
    }

    pub fn revealed_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| self.reveal.is_revealed(b.id))
            .count()
    }

    /// Scroll position as a percentage of the scrollable range.
    pub fn progress_pct(&self) -> u16 {
        match self.max_offset() {
            0 => 100,
            max => ((u32::from(self.offset) * 100) / u32::from(max)) as u16,
        }
    }

    fn absorb_transitions(&mut self) {
        for t in self.reveal.drain_transitions() {
            if t.to.is_revealed() {
                self.revealed_at.insert(t.id, t.at_ms);
            }
        }
    }
}

/// Grid column count for a page `width` columns wide.
pub fn grid_columns(width: u16) -> u16 {
    match width {
        w if w >= 120 => 3,
        w if w >= 80 => 2,
        _ => 1,
    }
}

/// Place every block top to bottom. Consecutive grid cards share rows.
/// Returns the placed blocks and the total page height.
pub fn layout(
    specs: &[BlockSpec],
    width: u16,
    view: &ProjectionView,
) -> (Vec<(BlockSpec, Region, Vec<Line<'static>>)>, u16) {
    let width = width.max(1);
    let columns = grid_columns(width);
    let card_width = (width / columns).max(1);

    let mut placed = Vec::with_capacity(specs.len());
    let mut top: u16 = 0;
    let mut i = 0;

    while i < specs.len() {
        let spec = specs[i];
        if !spec.kind.is_grid_card() {
            let lines = block_lines(spec.kind, width, view);
            let height = lines.len() as u16;
            placed.push((spec, cell_region(0, top, width, height), lines));
            top = top.saturating_add(height);
            i += 1;
            continue;
        }

        // One grid row: up to `columns` consecutive cards of the same family.
        let family = std::mem::discriminant(&spec.kind);
        let row: Vec<(BlockSpec, Vec<Line<'static>>)> = specs[i..]
            .iter()
            .take(columns as usize)
            .take_while(|s| std::mem::discriminant(&s.kind) == family)
            .map(|&s| (s, block_lines(s.kind, card_width, view)))
            .collect();
        let row_height = row.iter().map(|(_, l)| l.len()).max().unwrap_or(0) as u16;

        for (col, (s, lines)) in row.iter().enumerate() {
            let left = col as u16 * card_width;
            placed.push((*s, cell_region(left, top, card_width, row_height), lines.clone()));
        }
        i += row.len();
        top = top.saturating_add(row_height);
    }

    (placed, top)
}

fn cell_region(left: u16, top: u16, width: u16, height: u16) -> Region {
    Region::new(
        f64::from(left),
        f64::from(top),
        f64::from(width),
        f64::from(height),
    )
}
