use scorecard::config::Config;
use scorecard::{AppError, EditOutcome, IndicatorStore, Perspective, ScorecardService, SqliteStore};
use tempfile::TempDir;

fn open(dir: &TempDir) -> ScorecardService<SqliteStore> {
    let mut config = Config::default();
    config.general.database_file = dir.path().join("bsc.db");
    ScorecardService::open(&config).unwrap()
}

#[test]
fn add_then_report_under_financial() {
    let dir = tempfile::tempdir().unwrap();
    let service = open(&dir);

    let kpi = service
        .add_indicator("Financial", "Revenue Growth", 100.0, 80.0, None)
        .unwrap();
    assert_eq!(kpi.score, 80.0);

    let report = service.report().unwrap();
    let rows = report.get(Perspective::Financial);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Revenue Growth");
    assert_eq!(rows[0].target, 100.0);
    assert_eq!(rows[0].actual, 80.0);
    assert_eq!(rows[0].score, 80.0);
}

#[test]
fn duplicate_add_keeps_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let service = open(&dir);

    service.add_indicator("Financial", "Revenue Growth", 100.0, 80.0, None).unwrap();
    let err = service
        .add_indicator("Financial", "Revenue Growth", 100.0, 80.0, None)
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateIndicator { .. }));
    assert_eq!(service.store().count().unwrap(), 1);
    assert_eq!(service.report().unwrap().get(Perspective::Financial).len(), 1);
}

#[test]
fn editing_unknown_kpi_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let service = open(&dir);

    let outcome = service.edit_indicator("Customer", "NPS", 50.0, 40.0).unwrap();
    assert!(matches!(outcome, EditOutcome::NotFound { .. }));
    assert_eq!(service.store().count().unwrap(), 0);
}

#[test]
fn edit_recomputes_score() {
    let dir = tempfile::tempdir().unwrap();
    let service = open(&dir);

    service.add_indicator("Customer", "NPS", 50.0, 25.0, None).unwrap();
    service.edit_indicator("Customer", "NPS", 50.0, 45.0).unwrap();

    let stored = service.store().find(Perspective::Customer, "NPS").unwrap().unwrap();
    assert_eq!(stored.actual, 45.0);
    assert_eq!(stored.score, 90.0);
}

#[test]
fn deleting_missing_kpi_is_success() {
    let dir = tempfile::tempdir().unwrap();
    let service = open(&dir);
    service.add_indicator("Learning & Growth", "Training Hours", 40.0, 30.0, None).unwrap();

    assert!(!service.remove_indicator("Learning & Growth", "Nonexistent").unwrap());
    assert!(!service.remove_indicator("Learning & Growth", "Nonexistent").unwrap());
    assert_eq!(service.store().count().unwrap(), 1);
}

#[test]
fn report_always_has_four_perspectives() {
    let dir = tempfile::tempdir().unwrap();
    let service = open(&dir);
    service.add_indicator("Internal Processes", "Cycle Time", 10.0, 0.0, None).unwrap();

    let report = service.report().unwrap();
    let keys: Vec<_> = report.iter().map(|(p, _)| p.label()).collect();
    assert_eq!(
        keys,
        vec!["Financial", "Customer", "Internal Processes", "Learning & Growth"]
    );
    assert_eq!(report.get(Perspective::InternalProcesses)[0].score, 0.0);
}

#[test]
fn records_persist_across_invocations() {
    let dir = tempfile::tempdir().unwrap();

    let first = open(&dir);
    first.add_indicator("Customer", "Retention", 0.0, 12.0, Some(3.0)).unwrap();
    first.into_store().close().unwrap();

    let second = open(&dir);
    let stored = second.store().find(Perspective::Customer, "Retention").unwrap().unwrap();
    assert_eq!(stored.score, 0.0);
    assert_eq!(stored.weight, 3.0);
    assert!(matches!(
        second.add_indicator("Customer", "Retention", 1.0, 1.0, None),
        Err(AppError::DuplicateIndicator { .. })
    ));
}
