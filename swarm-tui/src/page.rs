//! Page content and block order.
//!
//! Every block on the page registers with the reveal controller. The copy
//! lives here as static data; the projection figures are computed at startup.

use swarm_core::reveal::{
    card_stagger, BREAKEVEN_STAGGER_MS, DEFAULT_THRESHOLD, TABLE_STAGGER_MS,
};

pub struct ArchCard {
    pub title: &'static str,
    pub tag: &'static str,
    pub body: &'static str,
}

pub const HERO_KICKER: &str = "Autonomous Quant System · Solana Mainnet";
pub const HERO_SUBTITLE: &str = "SELF-EVOLVING TRADING INTELLIGENCE";
pub const HERO_BODY: &str = "A self-evolving, self-learning quantitative trading system for Solana \
    mainnet. Built across four phases. Runs without human intervention. Targets a 75-82% win \
    rate through genetic strategy evolution, regime-aware execution, and on-chain whale \
    intelligence.";

pub const HERO_STATS: [(&str, &str); 4] = [
    ("40+", "Indicator Library"),
    ("75-82%", "Projected Win Rate"),
    ("6", "Regime Detectors"),
    ("24/7", "Autonomous"),
];

pub const ARCH_CARDS: [ArchCard; 6] = [
    ArchCard {
        title: "Genetic Evolution Engine",
        tag: "OPTUNA BAYESIAN OPTIMIZER",
        body: "A genetic algorithm breeds strategy genomes from a library of 40+ indicators. \
            A population of 50 competing strategies: weak ones are eliminated, strong ones \
            reproduce and mutate every night.",
    },
    ArchCard {
        title: "Regime-Aware Execution",
        tag: "+10-15% WIN RATE ADVANTAGE",
        body: "Six market regimes detected in real time. Every strategy is deployed only in \
            the regime it was evolved for.",
    },
    ArchCard {
        title: "On-Chain Whale Intelligence",
        tag: "PRE-MOVE ALPHA",
        body: "Whale wallet accumulation and DEX liquidity changes stream in seconds before \
            they appear in price data. Flow confidence scales every trade between 0.6x and 1.5x.",
    },
    ArchCard {
        title: "Kelly Criterion Sizing",
        tag: "ASYMMETRIC COMPOUNDING",
        body: "Position sizes are never flat. Fractional Kelly sizes each trade from live win \
            rate, reward:risk ratio and flow confidence.",
    },
    ArchCard {
        title: "Meta-Learning Memory",
        tag: "SELF-IMPROVING AFTER LAUNCH",
        body: "Every trade is attributed to strategy, regime and token tier. After 20+ trades \
            strategy selection becomes fully evidence-based.",
    },
    ArchCard {
        title: "Short Side: Bear Regimes",
        tag: "MARKET-NEUTRAL CAPABLE",
        body: "In bear regimes capital deploys short via inverse tokens. Capital is never idle \
            waiting for bulls.",
    },
];

pub const TECH_STACK: [(&str, &str); 8] = [
    ("Execution", "Jupiter V6 · Solana Mainnet"),
    ("Oracles", "Binance + CoinGecko + Jupiter"),
    ("Evolution", "Genetic Algorithm + Optuna TPE"),
    ("On-Chain", "Helius Enhanced API"),
    ("LLM Strategy", "Gemini Flash · OpenRouter"),
    ("MEV Protection", "Jito Bundle Support"),
    ("Deployment", "Docker · Single Command"),
    ("Codebase", "40 Modules · Python 3.11"),
];

pub const ACQUIRE_ITEMS: [(&str, &str); 4] = [
    (
        "Complete Source",
        "Every module of the evolution engine, meta-learning system, flow agent and execution pipeline.",
    ),
    (
        "One-Command Deploy",
        "Docker Compose on any Linux VPS. Live in under 10 minutes.",
    ),
    (
        "Handover Support",
        "30 days of post-sale deployment support and an architecture walkthrough.",
    ),
    (
        "Exclusive Transfer",
        "Copyright transfer. One acquisition, one owner.",
    ),
];

pub const QUOTE: &str = "The acquisition cost is recovered by compounding alone; every figure \
    below is derived from the stated assumptions.";

pub const DISCLAIMER: &str = "Sold as software only. Compounding projections are mathematical \
    illustrations based on assumed parameters. Actual results depend on market conditions, \
    capital and configuration. Past paper performance does not guarantee future live returns. \
    Cryptocurrency trading involves substantial risk of loss. Not financial advice.";

/// Horizons emphasized in the projection table.
pub const HIGHLIGHTED_MONTHS: [u32; 3] = [6, 12, 24];

/// One unit of content that fades in on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Hero,
    HeroStats,
    Divider(&'static str),
    Heading {
        kicker: &'static str,
        title: &'static str,
    },
    ArchCard(usize),
    AssumptionsNote,
    ProjectionTable,
    Quote,
    BreakevenHeading,
    BreakevenCard(usize),
    TechStrip,
    AcquireIncludes,
    AcquirePrice,
    Footer,
}

impl BlockKind {
    /// Cards are laid out in a grid; everything else spans the page width.
    pub fn is_grid_card(&self) -> bool {
        matches!(self, BlockKind::ArchCard(_) | BlockKind::BreakevenCard(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSpec {
    pub kind: BlockKind,
    pub threshold: f64,
    pub stagger_ms: u64,
}

impl BlockSpec {
    fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            threshold: DEFAULT_THRESHOLD,
            stagger_ms: 0,
        }
    }

    fn delayed(kind: BlockKind, stagger_ms: u64) -> Self {
        Self {
            stagger_ms,
            ..Self::new(kind)
        }
    }
}

/// All blocks in page order. `breakeven_cards` is the number of tiers shown.
pub fn page_blocks(breakeven_cards: usize) -> Vec<BlockSpec> {
    let mut blocks = vec![
        BlockSpec::new(BlockKind::Hero),
        BlockSpec::new(BlockKind::HeroStats),
        BlockSpec::new(BlockKind::Divider("System Architecture")),
        BlockSpec::new(BlockKind::Heading {
            kicker: "Four-Phase Build",
            title: "WHAT A QUANT FUND CHARGES €500K TO BUILD",
        }),
    ];
    blocks.extend(
        (0..ARCH_CARDS.len()).map(|i| BlockSpec::delayed(BlockKind::ArchCard(i), card_stagger(i))),
    );

    blocks.extend([
        BlockSpec::new(BlockKind::Divider("Return Projections")),
        BlockSpec::new(BlockKind::Heading {
            kicker: "Daily Compounding",
            title: "WHAT CAPITAL BECOMES IN THIS SYSTEM",
        }),
        BlockSpec::new(BlockKind::AssumptionsNote),
        BlockSpec::delayed(BlockKind::ProjectionTable, TABLE_STAGGER_MS),
        BlockSpec::new(BlockKind::Quote),
        BlockSpec::new(BlockKind::BreakevenHeading),
    ]);
    blocks.extend((0..breakeven_cards).map(|i| {
        BlockSpec::delayed(BlockKind::BreakevenCard(i), i as u64 * BREAKEVEN_STAGGER_MS)
    }));

    blocks.extend([
        BlockSpec::new(BlockKind::TechStrip),
        BlockSpec::new(BlockKind::Divider("Acquisition")),
        BlockSpec::new(BlockKind::AcquireIncludes),
        BlockSpec::new(BlockKind::AcquirePrice),
        BlockSpec::new(BlockKind::Footer),
    ]);
    blocks
}

/// Greedy word wrap to `width` columns. Never returns an empty vector.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_are_staggered_in_order() {
        let blocks = page_blocks(4);
        let cards: Vec<_> = blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::ArchCard(_)))
            .map(|b| b.stagger_ms)
            .collect();
        assert_eq!(cards, vec![0, 75, 150, 225, 300, 375]);

        let breakeven: Vec<_> = blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::BreakevenCard(_)))
            .map(|b| b.stagger_ms)
            .collect();
        assert_eq!(breakeven, vec![0, 140, 280, 420]);
    }

    #[test]
    fn page_starts_with_hero_and_ends_with_footer() {
        let blocks = page_blocks(0);
        assert_eq!(blocks.first().map(|b| b.kind), Some(BlockKind::Hero));
        assert_eq!(blocks.last().map(|b| b.kind), Some(BlockKind::Footer));
        assert!(blocks.iter().all(|b| b.threshold == DEFAULT_THRESHOLD));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_keeps_long_words_whole() {
        assert_eq!(wrap_text("supercalifragilistic", 5), vec!["supercalifragilistic"]);
        assert_eq!(wrap_text("", 5), vec![String::new()]);
    }
}
