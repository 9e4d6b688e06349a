//! Core data structures for scorecard management
//!
//! This module contains the perspectives, indicator records and the grouped
//! report returned to callers.

use crate::core::scoring;
use crate::utils::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the four fixed Balanced Scorecard perspectives.
///
/// Variant order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Perspective {
    #[serde(rename = "Financial")]
    Financial,
    #[serde(rename = "Customer")]
    Customer,
    #[serde(rename = "Internal Processes")]
    InternalProcesses,
    #[serde(rename = "Learning & Growth")]
    LearningAndGrowth,
}

impl Perspective {
    pub const ALL: [Perspective; 4] = [
        Perspective::Financial,
        Perspective::Customer,
        Perspective::InternalProcesses,
        Perspective::LearningAndGrowth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Perspective::Financial => "Financial",
            Perspective::Customer => "Customer",
            Perspective::InternalProcesses => "Internal Processes",
            Perspective::LearningAndGrowth => "Learning & Growth",
        }
    }

    /// Exact, case-sensitive label lookup
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Resolve user input: a 1-based index or a case-insensitive label
    pub fn resolve(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(index) = input.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied());
        }
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Perspective {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| AppError::InvalidPerspective(s.to_string()))
    }
}

/// A stored KPI record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub perspective: Perspective,
    pub name: String,
    pub target: f64,
    pub actual: f64,
    pub weight: f64,
    pub score: f64,
}

impl Indicator {
    /// Build a record, deriving its score from target and actual
    pub fn new(perspective: Perspective, name: String, target: f64, actual: f64, weight: f64) -> Self {
        Self {
            perspective,
            name,
            target,
            actual,
            weight,
            score: scoring::score(target, actual),
        }
    }

    pub fn to_row(&self) -> ReportRow {
        ReportRow {
            name: self.name.clone(),
            target: self.target,
            actual: self.actual,
            score: self.score,
        }
    }
}

/// One indicator as shown in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub target: f64,
    pub actual: f64,
    pub score: f64,
}

/// Indicators grouped by perspective.
///
/// Always holds all four perspectives, iterated in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScorecardReport {
    groups: BTreeMap<Perspective, Vec<ReportRow>>,
}

/// Count and mean score for a single perspective
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveSummary {
    pub perspective: Perspective,
    pub count: usize,
    pub average_score: Option<f64>,
}

impl ScorecardReport {
    /// Create a report with every perspective mapped to an empty list
    pub fn new() -> Self {
        Self {
            groups: Perspective::ALL.into_iter().map(|p| (p, Vec::new())).collect(),
        }
    }

    /// Append a row under its perspective
    pub fn push(&mut self, perspective: Perspective, row: ReportRow) {
        self.groups.entry(perspective).or_default().push(row);
    }

    pub fn get(&self, perspective: Perspective) -> &[ReportRow] {
        self.groups.get(&perspective).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Perspective, &[ReportRow])> {
        self.groups.iter().map(|(p, rows)| (*p, rows.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn summaries(&self) -> Vec<PerspectiveSummary> {
        self.iter()
            .map(|(perspective, rows)| {
                let average_score = if rows.is_empty() {
                    None
                } else {
                    let sum: f64 = rows.iter().map(|r| r.score).sum();
                    Some(scoring::round2(sum / rows.len() as f64))
                };
                PerspectiveSummary {
                    perspective,
                    count: rows.len(),
                    average_score,
                }
            })
            .collect()
    }
}

impl Default for ScorecardReport {
    fn default() -> Self {
        Self::new()
    }
}
