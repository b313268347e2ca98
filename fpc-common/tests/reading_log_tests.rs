//! Integration tests for the reading log
//!
//! Each test gets its own SQLite file in a temporary directory.

use chrono::{Local, TimeZone};
use fpc_common::db::{init_database, log_reading, log_reading_at, recent_readings, recent_readings_in, ReadingEntry};
use fpc_common::diagnostics::{BwReading, Channels, ColorReading, Diagnostician, Diagnosis, ProcessType, Strip, ToleranceLevel};
use fpc_common::Error;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("fpc.db")).await.unwrap();
    (dir, pool)
}

fn bw_reference() -> BwReading {
    BwReading { dmax: 170, hd: 146, ld: 50, dmin: 30 }
}

fn bw_entry(reading: BwReading) -> (ReadingEntry, Diagnosis) {
    let diagnosis = Diagnosis::Bw(Diagnostician::standard().diagnose_bw(&reading, &bw_reference(), &[]));
    (ReadingEntry::new(Strip::Bw(reading)), diagnosis)
}

fn c41_entry() -> (ReadingEntry, Diagnosis) {
    let reference = ColorReading {
        dmax: Channels::new(163, 245, 275),
        hd: Channels::new(172, 310, 336),
        ld: Channels::new(39, 94, 103),
        dmin: Channels::new(28, 74, 96),
        yellow_b: None,
    };
    let mut reading = reference;
    reading.hd.g += 12;
    let diagnosis = Diagnosis::C41(Diagnostician::standard().diagnose_c41(&reading, &reference));
    (ReadingEntry::new(Strip::C41(reading)), diagnosis)
}

#[tokio::test]
async fn test_rows_start_at_first_data_row_and_advance() {
    let (_dir, pool) = setup_db().await;
    let at = Local.with_ymd_and_hms(2025, 11, 3, 9, 15, 0).unwrap();
    let (entry, diagnosis) = bw_entry(bw_reference());

    let first = log_reading_at(&pool, &entry, &diagnosis, at).await.unwrap();
    let second = log_reading_at(&pool, &entry, &diagnosis, at).await.unwrap();

    assert_eq!(first.period, "Nov 2025");
    assert_eq!(first.row, 5);
    assert_eq!(second.row, 6);
}

#[tokio::test]
async fn test_rows_counted_per_process_and_period() {
    let (_dir, pool) = setup_db().await;
    let november = Local.with_ymd_and_hms(2025, 11, 28, 12, 0, 0).unwrap();
    let december = Local.with_ymd_and_hms(2025, 12, 1, 12, 0, 0).unwrap();
    let (bw, bw_diagnosis) = bw_entry(bw_reference());
    let (c41, c41_diagnosis) = c41_entry();

    log_reading_at(&pool, &bw, &bw_diagnosis, november).await.unwrap();
    let c41_row = log_reading_at(&pool, &c41, &c41_diagnosis, november).await.unwrap();
    let new_month = log_reading_at(&pool, &bw, &bw_diagnosis, december).await.unwrap();

    assert_eq!(c41_row.row, 5);
    assert_eq!(new_month.period, "Dec 2025");
    assert_eq!(new_month.row, 5);
}

#[tokio::test]
async fn test_logged_fields_round_trip() {
    let (_dir, pool) = setup_db().await;
    let at = Local.with_ymd_and_hms(2025, 6, 10, 14, 30, 0).unwrap();
    let (mut entry, diagnosis) = c41_entry();
    entry.notes = Some("Fresh replenisher".to_string());

    log_reading_at(&pool, &entry, &diagnosis, at).await.unwrap();
    let rows = recent_readings_in(&pool, ProcessType::C41, "June 2025", 10).await.unwrap();

    assert_eq!(rows.len(), 1);
    let logged = &rows[0];
    assert_eq!(logged.process, ProcessType::C41);
    assert_eq!(logged.date, "10/06/2025");
    assert_eq!(logged.time, "14:30");
    assert_eq!(logged.notes, "Fresh replenisher");
    assert_eq!(logged.readings["hd"]["g"], 322);
    assert_eq!(logged.deviations["hdld"]["g"], 12);
    assert_eq!(logged.hdld, serde_json::json!({"r": 133, "g": 228, "b": 233}));
    assert_eq!(logged.status, ToleranceLevel::Control);
    assert_eq!(logged.problems, "Color Balance Spread Exceeded");
}

#[tokio::test]
async fn test_explicit_date_and_time_kept() {
    let (_dir, pool) = setup_db().await;
    let (mut entry, diagnosis) = bw_entry(bw_reference());
    entry.date = Some("05/12/2025".to_string());
    entry.time = Some("07:45".to_string());

    let outcome = log_reading(&pool, &entry, &diagnosis).await.unwrap();
    let rows = recent_readings_in(&pool, ProcessType::Bw, &outcome.period, 1).await.unwrap();
    assert_eq!(rows[0].date, "05/12/2025");
    assert_eq!(rows[0].time, "07:45");
    assert_eq!(rows[0].problems, "Process within limits");
    assert_eq!(rows[0].hdld, serde_json::json!(96));
}

#[tokio::test]
async fn test_recent_readings_newest_first_and_limited() {
    let (_dir, pool) = setup_db().await;
    for ld in [50, 48, 46, 44] {
        let (entry, diagnosis) = bw_entry(BwReading { ld, ..bw_reference() });
        log_reading(&pool, &entry, &diagnosis).await.unwrap();
    }

    let rows = recent_readings(&pool, ProcessType::Bw, 3).await.unwrap();
    let rows_seen: Vec<_> = rows.iter().map(|r| r.row).collect();
    assert_eq!(rows_seen, vec![8, 7, 6]);
    assert_eq!(rows[0].readings["ld"], 44);

    assert!(recent_readings(&pool, ProcessType::C41, 3).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_logging_allocates_distinct_rows() {
    let (_dir, pool) = setup_db().await;
    let at = Local.with_ymd_and_hms(2025, 3, 2, 8, 0, 0).unwrap();

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move {
                let (entry, diagnosis) = bw_entry(bw_reference());
                log_reading_at(&pool, &entry, &diagnosis, at).await.unwrap().row
            })
        })
        .collect();

    let mut rows = Vec::new();
    for task in tasks {
        rows.push(task.await.unwrap());
    }
    rows.sort_unstable();
    assert_eq!(rows, vec![5, 6, 7, 8, 9, 10]);
}

#[tokio::test]
async fn test_mismatched_diagnosis_rejected() {
    let (_dir, pool) = setup_db().await;
    let (entry, _) = bw_entry(bw_reference());
    let (_, c41_diagnosis) = c41_entry();

    let err = log_reading(&pool, &entry, &c41_diagnosis).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}
