//! Reading log queries

use chrono::{DateTime, Local, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use super::models::{LogOutcome, LoggedReading, ReadingEntry, FIRST_DATA_ROW};
use crate::diagnostics::{Diagnosis, ProcessType, ToleranceLevel};
use crate::time::{current_period, period_label, sheet_date, sheet_time};
use crate::{Error, Result};

/// Append a diagnosed strip to the current month's log
pub async fn log_reading(pool: &SqlitePool, entry: &ReadingEntry, diagnosis: &Diagnosis) -> Result<LogOutcome> {
    log_reading_at(pool, entry, diagnosis, Local::now()).await
}

/// Append a diagnosed strip to the log for the month containing `at`
///
/// The row number is allocated inside the insert, so concurrent writers for
/// the same process and period never share a row.
pub async fn log_reading_at(
    pool: &SqlitePool,
    entry: &ReadingEntry,
    diagnosis: &Diagnosis,
    at: DateTime<Local>,
) -> Result<LogOutcome> {
    let process = entry.process();
    if process != diagnosis.process() {
        return Err(Error::InvalidInput(format!(
            "Diagnosis is for {}, reading is {}",
            diagnosis.process(),
            process
        )));
    }

    let period = period_label(at.date_naive());
    let date = entry.date.clone().unwrap_or_else(|| sheet_date(at));
    let time = entry.time.clone().unwrap_or_else(|| sheet_time(at));
    let notes = entry.notes.clone().unwrap_or_default();

    let readings = serde_json::to_string(&entry.reading)?;
    let deviations = serde_json::to_string(&diagnosis.deviations())?;
    let hdld = entry.reading.raw_hdld().to_string();

    let row: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO readings (
            guid, process, period, row_number, date, time, notes,
            readings, deviations, hdld, status, problems, created_at
        )
        SELECT ?, ?, ?, ? + COUNT(*), ?, ?, ?, ?, ?, ?, ?, ?, ?
        FROM readings
        WHERE process = ? AND period = ?
        RETURNING row_number
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(process.as_str())
    .bind(&period)
    .bind(FIRST_DATA_ROW)
    .bind(&date)
    .bind(&time)
    .bind(&notes)
    .bind(&readings)
    .bind(&deviations)
    .bind(&hdld)
    .bind(diagnosis.status().overall.as_str())
    .bind(diagnosis.summary())
    .bind(Utc::now())
    .bind(process.as_str())
    .bind(&period)
    .fetch_one(pool)
    .await?;

    info!("Logged {} reading to {} row {}", process, period, row);

    Ok(LogOutcome { period, row })
}

/// Most recent entries for `process` in the current month, newest first
pub async fn recent_readings(pool: &SqlitePool, process: ProcessType, count: u32) -> Result<Vec<LoggedReading>> {
    recent_readings_in(pool, process, &current_period(), count).await
}

pub async fn recent_readings_in(
    pool: &SqlitePool,
    process: ProcessType,
    period: &str,
    count: u32,
) -> Result<Vec<LoggedReading>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, process, period, row_number, date, time, notes,
               readings, deviations, hdld, status, problems, created_at
        FROM readings
        WHERE process = ? AND period = ?
        ORDER BY row_number DESC
        LIMIT ?
        "#,
    )
    .bind(process.as_str())
    .bind(period)
    .bind(i64::from(count))
    .fetch_all(pool)
    .await?;

    rows.iter().map(logged_reading_from_row).collect()
}

fn logged_reading_from_row(row: &SqliteRow) -> Result<LoggedReading> {
    let guid: String = row.try_get("guid")?;
    let process: String = row.try_get("process")?;
    let status: String = row.try_get("status")?;

    Ok(LoggedReading {
        guid: Uuid::parse_str(&guid)
            .map_err(|e| Error::InvalidInput(format!("Stored guid {}: {}", guid, e)))?,
        process: process.parse::<ProcessType>()?,
        period: row.try_get("period")?,
        row: row.try_get("row_number")?,
        date: row.try_get("date")?,
        time: row.try_get("time")?,
        notes: row.try_get("notes")?,
        readings: serde_json::from_str(row.try_get("readings")?)?,
        deviations: serde_json::from_str(row.try_get("deviations")?)?,
        hdld: serde_json::from_str(row.try_get("hdld")?)?,
        status: parse_level(&status)?,
        problems: row.try_get("problems")?,
        created_at: row.try_get("created_at")?,
    })
}

fn parse_level(value: &str) -> Result<ToleranceLevel> {
    match value {
        "ok" => Ok(ToleranceLevel::Ok),
        "action" => Ok(ToleranceLevel::Action),
        "control" => Ok(ToleranceLevel::Control),
        other => Err(Error::InvalidInput(format!("Stored status {}", other))),
    }
}
