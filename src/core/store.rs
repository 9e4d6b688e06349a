//! SQLite-backed indicator store
//!
//! Records live in a single `kpis` table. Uniqueness of (perspective, name)
//! is enforced by a UNIQUE index, so duplicate inserts are rejected by the
//! database itself rather than by a prior lookup.

use std::path::Path;

use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use tracing::{debug, info, warn};

use crate::core::data::{Indicator, Perspective, ScorecardReport};
use crate::core::scoring;
use crate::core::traits::IndicatorStore;
use crate::utils::error::{AppError, AppResult};

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS kpis (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        perspective TEXT,
        name TEXT,
        target REAL,
        actual REAL,
        weight REAL,
        score REAL
    )";

// Created separately so tables from older versions also get the constraint.
const CREATE_UNIQUE_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_kpis_perspective_name ON kpis (perspective, name)";

const SELECT_COLUMNS: &str = "SELECT perspective, name, target, actual, weight, score FROM kpis";

/// Indicator store owning a single SQLite connection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path` and initialize the schema
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Io(format!("Failed to create database directory {}: {}", parent.display(), e))
                })?;
            }
        }

        info!("Opening SQLite database at {}", path.display());
        let conn = Connection::open(path)
            .map_err(|e| AppError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> AppResult<Self> {
        debug!("Opening in-memory SQLite database");
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Close the connection, surfacing any error from SQLite
    pub fn close(self) -> AppResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| AppError::Storage(format!("Failed to close database: {}", e)))
    }

    fn indicator_from_row(row: &Row<'_>) -> rusqlite::Result<(String, Indicator)> {
        let label: String = row.get(0)?;
        let indicator = Indicator {
            // Placeholder until the label is validated by the caller
            perspective: Perspective::Financial,
            name: row.get(1)?,
            target: row.get(2)?,
            actual: row.get(3)?,
            weight: row.get::<_, Option<f64>>(4)?.unwrap_or(scoring::DEFAULT_WEIGHT),
            score: row.get(5)?,
        };
        Ok((label, indicator))
    }

    fn resolve_row((label, mut indicator): (String, Indicator)) -> Option<Indicator> {
        match Perspective::from_label(&label) {
            Some(perspective) => {
                indicator.perspective = perspective;
                Some(indicator)
            }
            None => {
                warn!("Skipping KPI '{}' with unknown perspective '{}'", indicator.name, label);
                None
            }
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

impl IndicatorStore for SqliteStore {
    fn initialize(&self) -> AppResult<()> {
        self.conn
            .execute_batch(&format!("{};\n{};", CREATE_TABLE, CREATE_UNIQUE_INDEX))
            .map_err(|e| AppError::Storage(format!("Failed to initialize schema: {}", e)))?;
        debug!("Schema ready");
        Ok(())
    }

    fn add(
        &self,
        perspective: Perspective,
        name: &str,
        target: f64,
        actual: f64,
        weight: f64,
    ) -> AppResult<Indicator> {
        let indicator = Indicator::new(perspective, name.to_string(), target, actual, weight);

        let result = self.conn.execute(
            "INSERT INTO kpis (perspective, name, target, actual, weight, score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                perspective.label(),
                indicator.name,
                indicator.target,
                indicator.actual,
                indicator.weight,
                indicator.score,
            ],
        );

        match result {
            Ok(_) => {
                debug!("Added KPI '{}' under '{}' (score {})", name, perspective, indicator.score);
                Ok(indicator)
            }
            Err(err) if is_unique_violation(&err) => Err(AppError::DuplicateIndicator {
                perspective: perspective.label().to_string(),
                name: name.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn update(
        &self,
        perspective: Perspective,
        name: &str,
        target: f64,
        actual: f64,
    ) -> AppResult<Indicator> {
        let score = scoring::score(target, actual);
        let tx = self.conn.unchecked_transaction()?;

        let changed = tx.execute(
            "UPDATE kpis SET target = ?1, actual = ?2, score = ?3
             WHERE perspective = ?4 AND name = ?5",
            params![target, actual, score, perspective.label(), name],
        )?;

        if changed == 0 {
            // Dropping the transaction rolls back; nothing was written anyway.
            return Err(AppError::NotFound {
                perspective: perspective.label().to_string(),
                name: name.to_string(),
            });
        }

        let row = tx.query_row(
            &format!("{} WHERE perspective = ?1 AND name = ?2", SELECT_COLUMNS),
            params![perspective.label(), name],
            Self::indicator_from_row,
        )?;
        tx.commit()?;

        debug!("Updated KPI '{}' under '{}' (score {})", name, perspective, score);
        let (_, mut indicator) = row;
        indicator.perspective = perspective;
        Ok(indicator)
    }

    fn delete(&self, perspective: Perspective, name: &str) -> AppResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM kpis WHERE perspective = ?1 AND name = ?2",
            params![perspective.label(), name],
        )?;
        debug!("Deleted {} row(s) for KPI '{}' under '{}'", removed, name, perspective);
        Ok(removed > 0)
    }

    fn find(&self, perspective: Perspective, name: &str) -> AppResult<Option<Indicator>> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE perspective = ?1 AND name = ?2", SELECT_COLUMNS),
                params![perspective.label(), name],
                Self::indicator_from_row,
            )
            .optional()?;
        Ok(row.and_then(Self::resolve_row))
    }

    fn find_case_insensitive(&self, perspective: Perspective, name: &str) -> AppResult<Vec<Indicator>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE perspective = ?1 AND name = ?2 COLLATE NOCASE ORDER BY id",
            SELECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![perspective.label(), name], Self::indicator_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows.into_iter().filter_map(Self::resolve_row).collect())
    }

    fn count(&self) -> AppResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kpis", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn list_grouped_by_perspective(&self) -> AppResult<ScorecardReport> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map([], Self::indicator_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut report = ScorecardReport::new();
        for indicator in rows.into_iter().filter_map(Self::resolve_row) {
            report.push(indicator.perspective, indicator.to_row());
        }
        Ok(report)
    }
}
