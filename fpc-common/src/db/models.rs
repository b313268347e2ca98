//! Reading log models

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::diagnostics::{ProcessType, Strip, ToleranceLevel};

/// First data row on a monthly log sheet; rows above hold the headers
pub const FIRST_DATA_ROW: i64 = 5;

/// A strip submitted for logging
#[derive(Debug, Clone)]
pub struct ReadingEntry {
    pub reading: Strip,
    /// Free-form; defaults to today's date as `dd/mm/yyyy`
    pub date: Option<String>,
    /// Defaults to the current time as `HH:MM`
    pub time: Option<String>,
    pub notes: Option<String>,
}

impl ReadingEntry {
    pub fn new(reading: Strip) -> Self {
        Self {
            reading,
            date: None,
            time: None,
            notes: None,
        }
    }

    pub fn process(&self) -> ProcessType {
        self.reading.process()
    }
}

/// Where a logged strip landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogOutcome {
    pub period: String,
    pub row: i64,
}

/// A stored log row
#[derive(Debug, Clone, Serialize)]
pub struct LoggedReading {
    pub guid: Uuid,
    pub process: ProcessType,
    pub period: String,
    pub row: i64,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub readings: Value,
    pub deviations: Value,
    pub hdld: Value,
    pub status: ToleranceLevel,
    pub problems: String,
    pub created_at: DateTime<Utc>,
}
