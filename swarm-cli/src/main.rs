//! Neural Swarm CLI: projection table and breakeven commands.
//!
//! Commands:
//! - `project`: print the projected-value table, optionally as JSON or CSV
//! - `breakeven`: print how long each capital tier needs to recover the price
//! - `assumptions`: print the page's default config as TOML

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swarm_core::projection::format::{format_currency, format_percent, tier_label};
use swarm_core::projection::{
    profit_at, BreakevenResult, Horizon, ProjectionEngine, ProjectionRow,
};
use swarm_core::PageConfig;

#[derive(Parser)]
#[command(
    name = "swarm",
    about = "Neural Swarm CLI - compounding projection and breakeven from the page assumptions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the projected account value per capital tier and horizon.
    Project {
        /// Path to a TOML page config. Defaults to the page's figures.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the table to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the time each capital tier needs to recover the purchase price.
    Breakeven {
        /// Path to a TOML page config. Defaults to the page's figures.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the purchase price from the config.
        #[arg(long)]
        price: Option<f64>,

        /// Emit JSON instead of cards.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the default page config as TOML.
    Assumptions,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project { config, json, csv } => run_project(config.as_deref(), json, csv),
        Commands::Breakeven {
            config,
            price,
            json,
        } => run_breakeven(config.as_deref(), price, json),
        Commands::Assumptions => {
            print!("{}", PageConfig::default().to_toml()?);
            Ok(())
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

fn load_engine(config_path: Option<&Path>, price: Option<f64>) -> Result<ProjectionEngine> {
    let mut config = PageConfig::load_or_default(config_path)?;
    if let Some(p) = price {
        config.purchase_price = p;
    }
    let engine = config.engine()?;
    info!(
        fingerprint = %engine.assumptions().fingerprint(),
        purchase_price = engine.purchase_price(),
        "loaded page config"
    );
    Ok(engine)
}

fn run_project(config_path: Option<&Path>, json: bool, csv_path: Option<PathBuf>) -> Result<()> {
    let engine = load_engine(config_path, None)?;
    let rows = engine.projection();

    if let Some(path) = csv_path {
        write_projection_csv(&path, engine.assumptions().capital_tiers(), &rows)?;
        info!(path = %path.display(), rows = rows.len(), "wrote projection CSV");
    }

    if json {
        let report = ProjectionReport {
            fingerprint: engine.assumptions().fingerprint(),
            expected_value_per_trade: engine.expected_value_per_trade(),
            daily_growth_factor: engine.daily_growth_factor(),
            monthly_growth_rate: engine.monthly_growth_rate(),
            rows: &rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_assumptions_header(&engine);
        print_projection_table(engine.assumptions().capital_tiers(), &rows);
    }
    Ok(())
}

fn run_breakeven(config_path: Option<&Path>, price: Option<f64>, json: bool) -> Result<()> {
    if let Some(p) = price {
        if !(p.is_finite() && p >= 0.0) {
            bail!("--price must be a finite, non-negative amount (got {p})");
        }
    }
    let engine = load_engine(config_path, price)?;
    let results = engine.breakeven();
    let first = engine
        .assumptions()
        .horizons()
        .first()
        .copied()
        .unwrap_or(Horizon::Month(1));

    if json {
        let cards: Vec<BreakevenCard> = results
            .iter()
            .map(|r| BreakevenCard {
                result: *r,
                humanized: r.elapsed_to_recover.humanize(),
                note_horizon: first,
                note_profit: profit_at(engine.assumptions(), r.tier, first),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        print_breakeven_cards(&engine, results, first);
    }
    Ok(())
}

// ── Output ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProjectionReport<'a> {
    fingerprint: String,
    expected_value_per_trade: f64,
    daily_growth_factor: f64,
    monthly_growth_rate: f64,
    rows: &'a [ProjectionRow],
}

#[derive(Serialize)]
struct BreakevenCard {
    #[serde(flatten)]
    result: BreakevenResult,
    humanized: String,
    note_horizon: Horizon,
    note_profit: f64,
}

fn print_assumptions_header(engine: &ProjectionEngine) {
    let a = engine.assumptions();
    println!();
    println!("=== Projected Returns ===");
    println!(
        "Win rate:       {:.0}%   gain {:.2}%   loss {:.2}%",
        a.win_rate() * 100.0,
        a.avg_win_pct(),
        a.avg_loss_pct()
    );
    println!(
        "Sizing:         {:.1}% of equity, {} trades/day",
        a.kelly_fraction_of_equity() * 100.0,
        a.trades_per_day()
    );
    println!(
        "EV / trade:     {} of equity",
        format_percent(engine.expected_value_per_trade(), 4)
    );
    println!(
        "Monthly growth: ~{}",
        format_percent(engine.monthly_growth_rate(), 1)
    );
    println!();
}

fn print_projection_table(tiers: &[f64], rows: &[ProjectionRow]) {
    print!("{:<10}", "Horizon");
    for &tier in tiers {
        print!("{:>14}", tier_label(tier));
    }
    println!();
    println!("{}", "-".repeat(10 + 14 * tiers.len()));

    for row in rows {
        print!("{:<10}", row.horizon.to_string());
        for tv in &row.values_by_tier {
            print!("{:>14}", format_currency(tv.value));
        }
        println!();
    }
    println!();
}

fn print_breakeven_cards(engine: &ProjectionEngine, results: &[BreakevenResult], note: Horizon) {
    println!();
    println!(
        "=== Breakeven on {} ===",
        format_currency(engine.purchase_price())
    );
    for r in results {
        let note_profit = profit_at(engine.assumptions(), r.tier, note);
        println!(
            "{:<8} {:>12}   {} returns {}",
            tier_label(r.tier),
            r.elapsed_to_recover.humanize(),
            note,
            format_currency(note_profit)
        );
    }
    if results.iter().all(|r| !r.elapsed_to_recover.is_applicable()) {
        println!();
        println!("WARNING: assumptions do not grow capital; breakeven is never reached");
    }
    println!();
}

fn write_projection_csv(path: &Path, tiers: &[f64], rows: &[ProjectionRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create CSV file {}", path.display()))?;

    let mut header = vec!["horizon".to_string(), "days".to_string()];
    header.extend(tiers.iter().map(|&t| format!("{t}")));
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.horizon.to_string(), row.days_elapsed.to_string()];
        record.extend(row.values_by_tier.iter().map(|tv| format!("{:.2}", tv.value)));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
