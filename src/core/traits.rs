//! Core trait definitions for indicator persistence
//!
//! The service layer talks to storage only through this trait, so the
//! scorecard logic is independent of the backing database.

use crate::core::data::{Indicator, Perspective, ScorecardReport};
use crate::utils::error::AppResult;

/// Storage operations for indicator records
///
/// Implementations are the sole owner of the persisted record set and must
/// enforce (perspective, name) uniqueness at the storage level.
pub trait IndicatorStore {
    /// Ensure the backing schema exists. Safe to call on every startup.
    fn initialize(&self) -> AppResult<()>;

    /// Insert a new indicator, deriving its score.
    ///
    /// Fails with `AppError::DuplicateIndicator` if the pair already exists.
    fn add(
        &self,
        perspective: Perspective,
        name: &str,
        target: f64,
        actual: f64,
        weight: f64,
    ) -> AppResult<Indicator>;

    /// Overwrite target and actual and recompute the score.
    ///
    /// Fails with `AppError::NotFound` if no record matches.
    fn update(
        &self,
        perspective: Perspective,
        name: &str,
        target: f64,
        actual: f64,
    ) -> AppResult<Indicator>;

    /// Remove the matching record. Returns whether anything was removed;
    /// absence is not an error.
    fn delete(&self, perspective: Perspective, name: &str) -> AppResult<bool>;

    /// Find a record by exact perspective and name
    fn find(&self, perspective: Perspective, name: &str) -> AppResult<Option<Indicator>>;

    /// Find records whose name matches ignoring case
    fn find_case_insensitive(&self, perspective: Perspective, name: &str) -> AppResult<Vec<Indicator>>;

    /// Number of stored records
    fn count(&self) -> AppResult<usize>;

    /// All records grouped by perspective in canonical order
    fn list_grouped_by_perspective(&self) -> AppResult<ScorecardReport>;
}
