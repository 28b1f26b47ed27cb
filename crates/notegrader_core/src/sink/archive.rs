//! SQLite archive keeping every report ever written.
//!
//! # Responsibility
//! - Record each report with the run that produced it.
//! - Answer "latest version of a report" and "which runs exist".
//!
//! # Invariants
//! - One archive instance is one run; its `run_id` is a fresh UUID v4.
//! - The run row exists before any report row referencing it.

use crate::db::{open_db, open_db_in_memory};
use crate::sink::{validate_report_name, ReportSink, SinkError, SinkResult};
use chrono::{DateTime, TimeZone, Utc};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

const REPORT_SELECT_SQL: &str =
    "SELECT run_id, name, content, byte_len, created_at FROM report_archive";

/// One stored report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedReport {
    pub run_id: Uuid,
    pub name: String,
    pub content: String,
    pub byte_len: usize,
    pub created_at: DateTime<Utc>,
}

/// Summary of one archive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub report_count: usize,
}

/// Report sink backed by a migrated SQLite database.
pub struct SqliteReportArchive {
    conn: Connection,
    run_id: Uuid,
}

impl SqliteReportArchive {
    /// Opens or creates the archive file at `path` and starts a new run.
    pub fn open(path: impl AsRef<Path>) -> SinkResult<Self> {
        Self::start_run(open_db(path)?)
    }

    pub fn open_in_memory() -> SinkResult<Self> {
        Self::start_run(open_db_in_memory()?)
    }

    /// Starts a new run on an already migrated connection.
    pub fn start_run(conn: Connection) -> SinkResult<Self> {
        let run_id = Uuid::new_v4();
        conn.execute(
            "INSERT INTO report_runs (run_id, started_at) VALUES (?1, ?2);",
            params![run_id.to_string(), Utc::now().timestamp_millis()],
        )?;
        info!("event=archive_run module=sink status=start run_id={run_id}");
        Ok(Self { conn, run_id })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Most recently archived report called `name`, across all runs.
    pub fn latest(&self, name: &str) -> SinkResult<Option<ArchivedReport>> {
        let sql = format!(
            "{REPORT_SELECT_SQL} WHERE name = ?1 ORDER BY created_at DESC, id DESC LIMIT 1;"
        );
        let row = self
            .conn
            .query_row(&sql, params![name], read_report_row)
            .optional()?;
        row.map(RawReportRow::into_report).transpose()
    }

    /// Reports written during `run_id`, in write order.
    pub fn reports_for_run(&self, run_id: Uuid) -> SinkResult<Vec<ArchivedReport>> {
        let sql = format!("{REPORT_SELECT_SQL} WHERE run_id = ?1 ORDER BY id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![run_id.to_string()], read_report_row)?;
        let mut reports = Vec::new();
        for row in rows {
            reports.push(row?.into_report()?);
        }
        Ok(reports)
    }

    /// All runs, newest first.
    pub fn list_runs(&self) -> SinkResult<Vec<ArchivedRun>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.run_id, r.started_at, COUNT(a.id)
             FROM report_runs r
             LEFT JOIN report_archive a ON a.run_id = r.run_id
             GROUP BY r.run_id, r.started_at
             ORDER BY r.started_at DESC, r.rowid DESC;",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut runs = Vec::new();
        for row in rows {
            let (run_id, started_at, count) = row?;
            runs.push(ArchivedRun {
                run_id: parse_run_id(&run_id)?,
                started_at: parse_millis(started_at)?,
                report_count: usize::try_from(count)
                    .map_err(|_| SinkError::InvalidData(format!("negative count {count}")))?,
            });
        }
        Ok(runs)
    }
}

impl ReportSink for SqliteReportArchive {
    fn write_report(&mut self, name: &str, content: &str) -> SinkResult<()> {
        validate_report_name(name)?;
        let inserted = self.conn.execute(
            "INSERT INTO report_archive (run_id, name, content, byte_len, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                self.run_id.to_string(),
                name,
                content,
                content.len() as i64,
                Utc::now().timestamp_millis(),
            ],
        );
        match inserted {
            Ok(_) => {
                info!(
                    "event=report_write module=sink status=ok sink=archive report={name} bytes={} run_id={}",
                    content.len(),
                    self.run_id
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=report_write module=sink status=error sink=archive report={name} error={err}"
                );
                Err(err.into())
            }
        }
    }
}

struct RawReportRow {
    run_id: String,
    name: String,
    content: String,
    byte_len: i64,
    created_at: i64,
}

impl RawReportRow {
    fn into_report(self) -> SinkResult<ArchivedReport> {
        Ok(ArchivedReport {
            run_id: parse_run_id(&self.run_id)?,
            name: self.name,
            content: self.content,
            byte_len: usize::try_from(self.byte_len).map_err(|_| {
                SinkError::InvalidData(format!("negative byte length {}", self.byte_len))
            })?,
            created_at: parse_millis(self.created_at)?,
        })
    }
}

fn read_report_row(row: &Row<'_>) -> rusqlite::Result<RawReportRow> {
    Ok(RawReportRow {
        run_id: row.get(0)?,
        name: row.get(1)?,
        content: row.get(2)?,
        byte_len: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn parse_run_id(value: &str) -> SinkResult<Uuid> {
    Uuid::parse_str(value).map_err(|err| SinkError::InvalidData(format!("run id `{value}`: {err}")))
}

fn parse_millis(value: i64) -> SinkResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(value)
        .single()
        .ok_or_else(|| SinkError::InvalidData(format!("timestamp {value} out of range")))
}
