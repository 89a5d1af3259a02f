//! Property tests for projection and reveal invariants.
//!
//! Uses proptest to verify:
//! 1. Daily growth factor is positive, and exactly 1 at zero EV
//! 2. Projection is non-decreasing in time when growth >= 1, increasing in tier
//! 3. Projection is deterministic
//! 4. Breakeven never shrinks as the purchase price grows
//! 5. A full-threshold entry is revealed iff it has been fully visible, and
//!    stays revealed

use proptest::prelude::*;
use swarm_core::projection::{
    compute_breakeven, compute_projection, daily_growth_factor, expected_value_per_trade,
    AssumptionsConfig, Horizon, ProjectionAssumptions,
};
use swarm_core::reveal::{visible_fraction, Region, RevealController, Viewport};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_tiers() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::btree_set(1u32..1_000_000, 1..6)
        .prop_map(|set| set.into_iter().map(|t| t as f64).collect())
}

fn arb_horizons() -> impl Strategy<Value = Vec<Horizon>> {
    prop::collection::btree_set(1u32..48, 1..8)
        .prop_map(|set| set.into_iter().map(Horizon::Month).collect())
}

fn arb_assumptions() -> impl Strategy<Value = ProjectionAssumptions> {
    (
        0.0..=1.0_f64,
        0.0..5.0_f64,
        0.0..5.0_f64,
        0.001..=0.25_f64,
        1u32..20,
        arb_tiers(),
        arb_horizons(),
    )
        .prop_map(|(win_rate, win, loss, kelly, trades, tiers, horizons)| {
            AssumptionsConfig {
                win_rate,
                avg_win_pct: win,
                avg_loss_pct: loss,
                kelly_fraction_of_equity: kelly,
                trades_per_day: trades,
                capital_tiers: tiers,
                horizons,
            }
            .validate()
            .expect("strategy only generates valid assumptions")
        })
}

// ── 1–4. Projection ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn growth_factor_is_positive(a in arb_assumptions()) {
        let factor = daily_growth_factor(&a);
        prop_assert!(factor > 0.0);
        if expected_value_per_trade(&a) == 0.0 {
            prop_assert_eq!(factor, 1.0);
        }
    }

    #[test]
    fn projection_is_monotone(a in arb_assumptions()) {
        let rows = compute_projection(&a);
        prop_assert_eq!(rows.len(), a.horizons().len());

        for row in &rows {
            prop_assert_eq!(row.values_by_tier.len(), a.capital_tiers().len());
            for w in row.values_by_tier.windows(2) {
                // Underflow to zero is the only way equal tiers can appear.
                prop_assert!(w[0].value <= w[1].value);
            }
        }

        if daily_growth_factor(&a) >= 1.0 {
            for w in rows.windows(2) {
                for (earlier, later) in w[0].values_by_tier.iter().zip(&w[1].values_by_tier) {
                    prop_assert!(earlier.value <= later.value);
                }
            }
        }
    }

    #[test]
    fn projection_is_deterministic(a in arb_assumptions()) {
        let first = compute_projection(&a);
        let second = compute_projection(&a.clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn breakeven_grows_with_price(
        a in arb_assumptions(),
        low in 0.0..1_000_000.0_f64,
        extra in 0.0..1_000_000.0_f64,
    ) {
        let cheap = compute_breakeven(&a, low).unwrap();
        let dear = compute_breakeven(&a, low + extra).unwrap();
        for (c, d) in cheap.iter().zip(&dear) {
            match (c.elapsed_to_recover.days(), d.elapsed_to_recover.days()) {
                (Some(cd), Some(dd)) => prop_assert!(dd >= cd),
                (None, None) => {}
                _ => prop_assert!(false, "applicability must not depend on price"),
            }
        }
    }
}

#[test]
fn strictly_increasing_in_tier_for_page_defaults() {
    let rows = compute_projection(&ProjectionAssumptions::page_defaults());
    for row in rows {
        assert!(row.values_by_tier.windows(2).all(|w| w[0].value < w[1].value));
    }
}

// ── 5. Reveal ────────────────────────────────────────────────────────

proptest! {
    /// Random scroll path: a full-threshold, zero-stagger entry is revealed
    /// exactly from the first frame that contains it onward.
    #[test]
    fn full_threshold_reveal_tracks_first_full_view(
        block_top in 0.0..5_000.0_f64,
        block_height in 0.01..600.0_f64,
        path in prop::collection::vec(0.0..6_000.0_f64, 1..40),
    ) {
        let base = Viewport::new(0.0, 10_000.0, 1_000.0, 700.0);
        let region = Region::new(0.0, block_top, 1_000.0, block_height);
        let mut ctl = RevealController::new(base);
        let id = ctl.register(region, 1.0, 0).unwrap();
        prop_assert!(!ctl.is_revealed(id));

        let mut seen_full = false;
        for (t, scroll) in path.into_iter().enumerate() {
            let vp = base.scrolled_to(scroll);
            // Containment, computed without the intersection arithmetic.
            let contained =
                block_top >= scroll && block_top + block_height <= scroll + 700.0;
            prop_assert_eq!(visible_fraction(&region, &vp) >= 1.0, contained);
            seen_full |= contained;
            ctl.on_viewport(vp, t as u64);
            prop_assert_eq!(ctl.is_revealed(id), seen_full);
        }
    }
}
