//! Swarm Core: the computational core of the Neural Swarm pitch page.
//!
//! Two independent units, consumed by a rendering layer:
//! - `reveal`: per-block `Pending → Triggered → Revealed` state machine
//!   driven by viewport changes, with stagger timers and fail-open fallback
//! - `projection`: compounding-return model producing the projected-value
//!   table and per-tier breakeven durations
//!
//! Plus the shared scroll signal for navigation chrome and the TOML page
//! config.

pub mod config;
pub mod projection;
pub mod reveal;
pub mod scroll;

pub use config::{ConfigError, PageConfig, PAGE_PURCHASE_PRICE};
