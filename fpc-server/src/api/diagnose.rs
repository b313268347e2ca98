//! Stateless diagnosis endpoint

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use fpc_common::diagnostics::{knowledge_base, Diagnosis, Diagnostician};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiResult;
use crate::AppState;

/// Body of `POST /api/diagnose`
#[derive(Debug, Deserialize)]
pub struct DiagnoseRequest {
    pub process: String,
    /// The log form posts this as `readings`
    #[serde(alias = "readings")]
    pub reading: Value,
    pub reference: Value,
    /// Earlier B&W strips, oldest first
    #[serde(default)]
    pub history: Vec<Value>,
}

/// POST /api/diagnose
///
/// Diagnose one strip without logging it.
pub async fn diagnose(
    State(state): State<AppState>,
    payload: Result<Json<DiagnoseRequest>, JsonRejection>,
) -> ApiResult<Json<Diagnosis>> {
    let Json(request) = payload?;
    let diagnostician = Diagnostician::new(knowledge_base(), &state.tolerances);

    let diagnosis = diagnostician.diagnose_with_history(
        &request.process,
        &request.reading,
        &request.reference,
        &request.history,
    )?;

    debug!(process = %request.process, summary = %diagnosis.summary(), "Diagnosis served");
    Ok(Json(diagnosis))
}
