//! Block content: turns each `BlockKind` into styled lines for a given width.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use swarm_core::projection::format::{format_currency, format_percent, tier_label};
use swarm_core::projection::Horizon;

use crate::app::ProjectionView;
use crate::page::{
    wrap_text, BlockKind, ACQUIRE_ITEMS, ARCH_CARDS, DISCLAIMER, HERO_BODY, HERO_KICKER,
    HERO_STATS, HERO_SUBTITLE, HIGHLIGHTED_MONTHS, QUOTE, TECH_STACK,
};
use crate::theme;

const HORIZON_COLUMN: usize = 10;

/// Lines for one block at `width` columns. Always at least one line; the
/// trailing blank line is the block's bottom margin.
pub fn block_lines(kind: BlockKind, width: u16, view: &ProjectionView) -> Vec<Line<'static>> {
    let width = usize::from(width.max(4));
    let mut lines = match kind {
        BlockKind::Hero => hero(width),
        BlockKind::HeroStats => hero_stats(width),
        BlockKind::Divider(label) => divider(label, width),
        BlockKind::Heading { kicker, title } => heading(kicker, title, width),
        BlockKind::ArchCard(i) => arch_card(i, width),
        BlockKind::AssumptionsNote => assumptions_note(view, width),
        BlockKind::ProjectionTable => projection_table(view, width),
        BlockKind::Quote => quote(width),
        BlockKind::BreakevenHeading => vec![Line::styled(
            "BREAKEVEN: HOW FAST DOES THE PURCHASE PRICE PAY FOR ITSELF?",
            theme::gold(),
        )],
        BlockKind::BreakevenCard(i) => breakeven_card(view, i),
        BlockKind::TechStrip => tech_strip(),
        BlockKind::AcquireIncludes => acquire_includes(width),
        BlockKind::AcquirePrice => acquire_price(view),
        BlockKind::Footer => footer(width),
    };
    lines.push(Line::default());
    lines
}

fn wrapped(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    wrap_text(text, width)
        .into_iter()
        .map(|l| Line::styled(l, style))
        .collect()
}

fn hero(width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    lines.extend(wrapped(&HERO_KICKER.to_uppercase(), width, theme::gold_dim()));
    lines.push(Line::default());
    lines.extend(wrapped("N E U R A L   S W A R M", width, theme::heading()));
    lines.extend(wrapped(HERO_SUBTITLE, width, theme::muted()));
    lines.push(Line::default());
    lines.extend(wrapped(HERO_BODY, width.min(90), theme::text()));
    lines
}

fn hero_stats(width: usize) -> Vec<Line<'static>> {
    let cells: Vec<Vec<Span<'static>>> = HERO_STATS
        .iter()
        .map(|(value, label)| {
            vec![
                Span::styled(format!("{value:<8}"), theme::gold_bold()),
                Span::styled(format!("{:<20}", label.to_uppercase()), theme::muted()),
            ]
        })
        .collect();

    if width >= 28 * HERO_STATS.len() {
        vec![Line::from(cells.into_iter().flatten().collect::<Vec<_>>())]
    } else {
        cells.into_iter().map(Line::from).collect()
    }
}

fn divider(label: &str, width: usize) -> Vec<Line<'static>> {
    let label = format!(" {} ", label.to_uppercase());
    let side = width.saturating_sub(label.chars().count()) / 2;
    vec![
        Line::default(),
        Line::styled(
            format!("{}{}{}", "─".repeat(side), label, "─".repeat(side)),
            theme::gold_dim(),
        ),
    ]
}

fn heading(kicker: &str, title: &str, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(kicker.to_uppercase(), theme::gold())];
    lines.extend(wrapped(title, width, theme::heading()));
    lines
}

fn arch_card(index: usize, width: usize) -> Vec<Line<'static>> {
    let Some(card) = ARCH_CARDS.get(index) else {
        return vec![Line::default()];
    };
    let inner = width.saturating_sub(3);
    let mut lines = vec![Line::from(vec![
        Span::styled("▍ ", theme::gold()),
        Span::styled(card.title, theme::heading()),
    ])];
    lines.extend(
        wrap_text(card.body, inner)
            .into_iter()
            .map(|l| Line::styled(format!("  {l}"), theme::muted())),
    );
    lines.push(Line::styled(format!("  [{}]", card.tag), theme::gold()));
    lines
}

fn assumptions_note(view: &ProjectionView, width: usize) -> Vec<Line<'static>> {
    let a = &view.assumptions;
    let model = format!(
        "{:.0}% win rate · avg gain {}% of position · avg loss {}% · sizing {} of equity per trade · {} trades/day · all returns reinvested daily.",
        a.win_rate() * 100.0,
        a.avg_win_pct(),
        a.avg_loss_pct(),
        format_percent(a.kelly_fraction_of_equity(), 1),
        a.trades_per_day(),
    );
    let ev = format!(
        "Expected value per trade: ({:.2}×{}%) − ({:.2}×{}%) = {:+.3}% of position → {} of equity/trade → ~{} monthly compounded growth.",
        a.win_rate(),
        a.avg_win_pct(),
        1.0 - a.win_rate(),
        a.avg_loss_pct(),
        view.position_ev * 100.0,
        format_percent(view.equity_ev, 4),
        format_percent(view.monthly_growth, 1),
    );

    let inner = width.saturating_sub(2);
    let mut lines = vec![Line::styled("│ Model assumptions:", theme::gold())];
    for text in [model, ev] {
        lines.extend(
            wrap_text(&text, inner)
                .into_iter()
                .map(|l| Line::styled(format!("│ {l}"), theme::muted())),
        );
    }
    lines
}

fn projection_table(view: &ProjectionView, width: usize) -> Vec<Line<'static>> {
    let tiers = view.tiers();
    let column = (width.saturating_sub(HORIZON_COLUMN) / tiers.len().max(1)).clamp(8, 14);

    let mut header = vec![Span::styled(
        format!("{:<w$}", "HORIZON", w = HORIZON_COLUMN),
        theme::gold(),
    )];
    header.extend(
        tiers
            .iter()
            .map(|&t| Span::styled(format!("{:>column$}", tier_label(t)), theme::gold())),
    );

    let mut lines = vec![
        Line::from(header),
        Line::styled(
            "─".repeat(HORIZON_COLUMN + column * tiers.len()),
            theme::gold_dim(),
        ),
    ];

    for row in &view.rows {
        let highlighted = matches!(
            row.horizon,
            Horizon::Month(m) if HIGHLIGHTED_MONTHS.contains(&m)
        );
        let value_style = if highlighted {
            theme::gold_light()
        } else {
            theme::text()
        };

        let mut spans = vec![Span::styled(
            format!("{:<w$}", row.horizon.to_string(), w = HORIZON_COLUMN),
            theme::muted(),
        )];
        spans.extend(row.values_by_tier.iter().map(|tv| {
            let style = if tv.value < tv.tier {
                theme::loss()
            } else {
                value_style
            };
            Span::styled(format!("{:>column$}", format_currency(tv.value)), style)
        }));
        lines.push(Line::from(spans));
    }
    lines
}

fn quote(width: usize) -> Vec<Line<'static>> {
    wrap_text(QUOTE, width.saturating_sub(2))
        .into_iter()
        .map(|l| {
            Line::from(vec![
                Span::styled("┃ ", theme::gold()),
                Span::styled(l, theme::heading()),
            ])
        })
        .collect()
}

fn breakeven_card(view: &ProjectionView, index: usize) -> Vec<Line<'static>> {
    let Some(result) = view.breakeven.get(index) else {
        return vec![Line::default()];
    };
    let profit = view.note_profits.get(index).copied().unwrap_or(0.0);
    vec![
        Line::styled(format_currency(result.tier), theme::gold_bold()),
        Line::styled(result.elapsed_to_recover.humanize(), theme::heading()),
        Line::styled(
            format!("{} returns {}", view.note_horizon, format_currency(profit)),
            theme::muted(),
        ),
    ]
}

fn tech_strip() -> Vec<Line<'static>> {
    TECH_STACK
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", label.to_uppercase()), theme::muted()),
                Span::styled(*value, theme::gold()),
            ])
        })
        .collect()
}

fn acquire_includes(width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled("PRIVATE SALE · SERIOUS ENQUIRIES ONLY", theme::gold()),
        Line::styled("FULL ACQUISITION INCLUDES EVERYTHING", theme::heading()),
        Line::default(),
    ];
    for (title, body) in ACQUIRE_ITEMS {
        lines.push(Line::styled(format!("◆ {title}"), theme::gold()));
        lines.extend(
            wrap_text(body, width.saturating_sub(2))
                .into_iter()
                .map(|l| Line::styled(format!("  {l}"), theme::muted())),
        );
    }
    lines
}

fn acquire_price(view: &ProjectionView) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled("ACQUISITION PRICE", theme::muted()),
        Line::styled(format_currency(view.purchase_price), theme::gold_bold()),
    ];
    // The two largest tiers, largest last.
    let n = view.breakeven.len();
    for result in &view.breakeven[n.saturating_sub(2)..] {
        lines.push(Line::styled(
            format!(
                "At {} starting capital: recovered in {}",
                tier_label(result.tier),
                result.elapsed_to_recover.humanize()
            ),
            theme::muted(),
        ));
    }
    lines
}

fn footer(width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled("─".repeat(width), theme::gold_dim())];
    lines.extend(wrapped(DISCLAIMER, width, theme::muted()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::PageConfig;

    fn view() -> ProjectionView {
        ProjectionView::from_engine(&PageConfig::default().engine().unwrap())
    }

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn every_block_ends_with_margin() {
        let view = view();
        for kind in [
            BlockKind::Hero,
            BlockKind::Divider("x"),
            BlockKind::ArchCard(99),
            BlockKind::BreakevenCard(99),
            BlockKind::Footer,
        ] {
            let lines = block_lines(kind, 80, &view);
            assert!(lines.len() >= 2, "{kind:?}");
            assert_eq!(lines.last(), Some(&Line::default()));
        }
    }

    #[test]
    fn table_has_one_line_per_horizon() {
        let view = view();
        let lines = block_lines(BlockKind::ProjectionTable, 100, &view);
        // header + rule + 7 rows + margin
        assert_eq!(lines.len(), 10);
        let text = text_of(&lines);
        assert!(text.contains("$500K"));
        assert!(text.contains("Month 24"));
    }

    #[test]
    fn assumptions_note_shows_computed_ev() {
        let text = text_of(&block_lines(BlockKind::AssumptionsNote, 200, &view()));
        assert!(text.contains("+1.075% of position"), "{text}");
        assert!(text.contains("0.0215% of equity"), "{text}");
    }

    #[test]
    fn breakeven_card_uses_first_horizon() {
        let view = view();
        let text = text_of(&block_lines(BlockKind::BreakevenCard(3), 40, &view));
        assert!(text.contains("$100,000"));
        assert!(text.contains("Month 1 returns $3,"), "{text}");
    }

    #[test]
    fn narrow_widths_wrap_within_bounds() {
        let view = view();
        for kind in [BlockKind::Hero, BlockKind::ArchCard(0), BlockKind::Footer] {
            for line in block_lines(kind, 30, &view) {
                assert!(line.width() <= 30, "{kind:?}: {line:?}");
            }
        }
    }
}
