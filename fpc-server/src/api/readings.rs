//! Reading log endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use fpc_common::db::{self, LogOutcome, LoggedReading, ReadingEntry};
use fpc_common::diagnostics::{input::parse_strip, knowledge_base, Diagnosis, Diagnostician, ProcessType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

const DEFAULT_RECENT: u32 = 10;
const MAX_RECENT: u32 = 100;

/// Body of `POST /api/readings`
#[derive(Debug, Deserialize)]
pub struct LogReadingRequest {
    pub process: String,
    #[serde(alias = "readings")]
    pub reading: Value,
    pub reference: Value,
    #[serde(default)]
    pub history: Vec<Value>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoggedResult {
    #[serde(flatten)]
    pub outcome: LogOutcome,
    pub diagnosis: Diagnosis,
}

#[derive(Debug, Serialize)]
pub struct LogReadingResponse {
    pub success: bool,
    pub result: LoggedResult,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RecentReadingsResponse {
    pub success: bool,
    pub process: ProcessType,
    pub readings: Vec<LoggedReading>,
}

/// POST /api/readings
///
/// Diagnose a strip and append it to this month's log.
pub async fn log_reading(
    State(state): State<AppState>,
    payload: Result<Json<LogReadingRequest>, JsonRejection>,
) -> ApiResult<Json<LogReadingResponse>> {
    let Json(request) = payload?;
    let diagnostician = Diagnostician::new(knowledge_base(), &state.tolerances);

    let diagnosis = diagnostician.diagnose_with_history(
        &request.process,
        &request.reading,
        &request.reference,
        &request.history,
    )?;
    let strip = parse_strip(diagnosis.process(), &request.reading, "reading")?;

    let entry = ReadingEntry {
        reading: strip,
        date: request.date,
        time: request.time,
        notes: request.notes,
    };
    let outcome = db::log_reading(&state.db, &entry, &diagnosis).await?;

    Ok(Json(LogReadingResponse {
        success: true,
        result: LoggedResult { outcome, diagnosis },
    }))
}

/// GET /api/readings/:process?count=N
///
/// Newest first, current month only.
pub async fn recent_readings(
    State(state): State<AppState>,
    Path(process): Path<String>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> ApiResult<Json<RecentReadingsResponse>> {
    let Query(query) = query?;
    let process: ProcessType = process.parse()?;
    let count = query.count.unwrap_or(DEFAULT_RECENT);
    if count == 0 || count > MAX_RECENT {
        return Err(ApiError::BadRequest(format!(
            "count must be between 1 and {}",
            MAX_RECENT
        )));
    }

    let readings = db::recent_readings(&state.db, process, count).await?;

    Ok(Json(RecentReadingsResponse {
        success: true,
        process,
        readings,
    }))
}
