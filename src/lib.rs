//! Scorecard - a Rust-based Balanced Scorecard KPI tracker
//!
//! This library provides the core functionality for recording KPIs under
//! the four Balanced Scorecard perspectives, scoring them against their
//! targets, persisting them in SQLite and rendering grouped reports.

pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod utils;

// Re-export core types and traits for easier use
pub use crate::core::{
    data::{Indicator, Perspective, PerspectiveSummary, ReportRow, ScorecardReport},
    operations::{EditOutcome, ScorecardService},
    scoring::score,
    store::SqliteStore,
    traits::IndicatorStore,
};
pub use utils::error::{AppError, AppResult};
