//! Scorecard service
//!
//! Thin façade over an [`IndicatorStore`]: validates raw caller input,
//! delegates every read and write to the store and hands grouped data back
//! for rendering. It keeps no copy of the records.

use tracing::debug;

use crate::config::Config;
use crate::core::data::{Indicator, Perspective, ScorecardReport};
use crate::core::scoring::DEFAULT_WEIGHT;
use crate::core::store::SqliteStore;
use crate::core::traits::IndicatorStore;
use crate::utils::error::{AppError, AppResult};

/// Result of an edit request. A missing indicator is a normal outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Updated(Indicator),
    NotFound { perspective: Perspective, name: String },
}

pub struct ScorecardService<S: IndicatorStore> {
    store: S,
}

impl ScorecardService<SqliteStore> {
    /// Open the SQLite store configured in `config`
    pub fn open(config: &Config) -> AppResult<Self> {
        let store = SqliteStore::open(&config.general.database_file)?;
        Ok(Self::new(store))
    }
}

impl<S: IndicatorStore> ScorecardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Add a new indicator under `perspective`.
    ///
    /// `weight` defaults to 1 when not given.
    pub fn add_indicator(
        &self,
        perspective: &str,
        name: &str,
        target: f64,
        actual: f64,
        weight: Option<f64>,
    ) -> AppResult<Indicator> {
        let perspective: Perspective = perspective.parse()?;
        let name = validate_name(name)?;
        let target = validate_number("Target", target)?;
        let actual = validate_number("Actual", actual)?;
        let weight = validate_number("Weight", weight.unwrap_or(DEFAULT_WEIGHT))?;

        debug!("Adding KPI '{}' under '{}'", name, perspective);
        self.store.add(perspective, name, target, actual, weight)
    }

    /// Change target and actual for an existing indicator
    pub fn edit_indicator(
        &self,
        perspective: &str,
        name: &str,
        target: f64,
        actual: f64,
    ) -> AppResult<EditOutcome> {
        let perspective: Perspective = perspective.parse()?;
        let name = name.trim();
        let target = validate_number("Target", target)?;
        let actual = validate_number("Actual", actual)?;

        match self.store.update(perspective, name, target, actual) {
            Ok(indicator) => Ok(EditOutcome::Updated(indicator)),
            Err(AppError::NotFound { .. }) => {
                debug!("Edit skipped, KPI '{}' not found under '{}'", name, perspective);
                Ok(EditOutcome::NotFound {
                    perspective,
                    name: name.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Remove an indicator. Returns whether a record was removed; an
    /// unknown perspective or missing name is not an error.
    pub fn remove_indicator(&self, perspective: &str, name: &str) -> AppResult<bool> {
        match Perspective::from_label(perspective) {
            Some(perspective) => self.store.delete(perspective, name.trim()),
            None => {
                debug!("Delete ignored for unknown perspective '{}'", perspective);
                Ok(false)
            }
        }
    }

    /// Indicators under `perspective` whose name matches ignoring case
    pub fn similar_indicators(&self, perspective: Perspective, name: &str) -> AppResult<Vec<Indicator>> {
        self.store.find_case_insensitive(perspective, name.trim())
    }

    pub fn report(&self) -> AppResult<ScorecardReport> {
        self.store.list_grouped_by_perspective()
    }
}

fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("KPI name cannot be empty".to_string()));
    }
    Ok(name)
}

// SQLite stores NaN as NULL, which would make the row unreadable.
fn validate_number(field: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() {
        return Err(AppError::InvalidInput(format!("{} must be a finite number", field)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ScorecardService<SqliteStore> {
        ScorecardService::new(SqliteStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_add_then_report() {
        let svc = service();
        let kpi = svc
            .add_indicator("Financial", "Revenue Growth", 100.0, 80.0, None)
            .unwrap();
        assert_eq!(kpi.score, 80.0);
        assert_eq!(kpi.weight, 1.0);

        let report = svc.report().unwrap();
        let rows = report.get(Perspective::Financial);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Revenue Growth");
        assert_eq!(rows[0].score, 80.0);
    }

    #[test]
    fn test_add_rejects_unknown_perspective() {
        let svc = service();
        let err = svc.add_indicator("Sales", "Deals", 10.0, 5.0, None).unwrap_err();
        assert_eq!(err, AppError::InvalidPerspective("Sales".to_string()));

        let err = svc.add_indicator("financial", "Deals", 10.0, 5.0, None).unwrap_err();
        assert!(matches!(err, AppError::InvalidPerspective(_)));
        assert_eq!(svc.store().count().unwrap(), 0);
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let svc = service();
        let err = svc.add_indicator("Customer", "   ", 10.0, 5.0, None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_add_keeps_explicit_weight() {
        let svc = service();
        let kpi = svc.add_indicator("Customer", " Retention ", 90.0, 81.0, Some(2.5)).unwrap();
        assert_eq!(kpi.name, "Retention");
        assert_eq!(kpi.weight, 2.5);
        assert_eq!(kpi.score, 90.0);
    }

    #[test]
    fn test_duplicate_add_propagates_unchanged() {
        let svc = service();
        svc.add_indicator("Financial", "Revenue Growth", 100.0, 80.0, None).unwrap();
        let err = svc
            .add_indicator("Financial", "Revenue Growth", 100.0, 80.0, None)
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateIndicator { .. }));
        assert_eq!(svc.store().count().unwrap(), 1);
    }

    #[test]
    fn test_edit_missing_reports_not_found() {
        let svc = service();
        let outcome = svc.edit_indicator("Customer", "NPS", 50.0, 40.0).unwrap();
        assert_eq!(
            outcome,
            EditOutcome::NotFound {
                perspective: Perspective::Customer,
                name: "NPS".to_string(),
            }
        );
        assert_eq!(svc.store().count().unwrap(), 0);
    }

    #[test]
    fn test_edit_updates_score() {
        let svc = service();
        svc.add_indicator("Customer", "NPS", 50.0, 25.0, None).unwrap();

        match svc.edit_indicator("Customer", "NPS", 50.0, 45.0).unwrap() {
            EditOutcome::Updated(kpi) => {
                assert_eq!(kpi.actual, 45.0);
                assert_eq!(kpi.score, 90.0);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_rejects_unknown_perspective() {
        let svc = service();
        let err = svc.edit_indicator("Sales", "NPS", 1.0, 1.0).unwrap_err();
        assert!(matches!(err, AppError::InvalidPerspective(_)));
    }

    #[test]
    fn test_remove_never_errors_on_absence() {
        let svc = service();
        assert!(!svc.remove_indicator("Learning & Growth", "Nonexistent").unwrap());
        assert!(!svc.remove_indicator("Sales", "Nonexistent").unwrap());

        svc.add_indicator("Learning & Growth", "Training Hours", 40.0, 20.0, None).unwrap();
        assert!(svc.remove_indicator("Learning & Growth", "Training Hours").unwrap());
        assert!(!svc.remove_indicator("Learning & Growth", "Training Hours").unwrap());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let svc = service();
        svc.add_indicator("Financial", "Revenue Growth", 100.0, 80.0, None).unwrap();

        let err = svc.add_indicator("Financial", "Margin", f64::NAN, 1.0, None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        let err = svc.add_indicator("Financial", "Margin", 1.0, f64::INFINITY, None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        let err = svc.add_indicator("Financial", "Margin", 1.0, 1.0, Some(f64::NAN)).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        let err = svc.edit_indicator("Financial", "Revenue Growth", 100.0, f64::NAN).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        assert_eq!(svc.store().count().unwrap(), 1);
        let report = svc.report().unwrap();
        assert_eq!(report.get(Perspective::Financial)[0].score, 80.0);
    }

    #[test]
    fn test_similar_indicators_ignore_case() {
        let svc = service();
        svc.add_indicator("Internal Processes", "Cycle Time", 10.0, 8.0, None).unwrap();
        let similar = svc.similar_indicators(Perspective::InternalProcesses, "CYCLE TIME").unwrap();
        assert_eq!(similar.len(), 1);
    }
}
