//! TOML page configuration: projection assumptions and the purchase price.
//!
//! ```toml
//! purchase_price = 25000.0
//!
//! [assumptions]
//! win_rate = 0.75
//! avg_win_pct = 1.8
//! avg_loss_pct = 1.1
//! kelly_fraction_of_equity = 0.02
//! trades_per_day = 5
//! capital_tiers = [1000.0, 10000.0, 25000.0, 100000.0, 500000.0]
//! horizons = ["Month 1", "Month 3", "Month 6"]
//! ```
//!
//! Both keys are optional and fall back to the page's figures. The
//! assumptions table, when present, must be complete.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projection::{BreakevenError, ProjectionAssumptions, ProjectionEngine};

/// Acquisition price quoted on the page.
pub const PAGE_PURCHASE_PRICE: f64 = 25_000.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    PurchasePrice(#[from] BreakevenError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_purchase_price")]
    pub purchase_price: f64,

    #[serde(default = "ProjectionAssumptions::page_defaults")]
    pub assumptions: ProjectionAssumptions,
}

fn default_purchase_price() -> f64 {
    PAGE_PURCHASE_PRICE
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            purchase_price: PAGE_PURCHASE_PRICE,
            assumptions: ProjectionAssumptions::page_defaults(),
        }
    }
}

impl PageConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` if given, otherwise the page defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the engine, validating the purchase price.
    pub fn engine(&self) -> Result<ProjectionEngine, ConfigError> {
        Ok(ProjectionEngine::new(
            self.assumptions.clone(),
            self.purchase_price,
        )?)
    }
}
