//! Knowledge base display endpoints

use axum::{extract::Path, Json};
use fpc_common::diagnostics::{knowledge_base, Catalog, FaultRecord};

use crate::error::{ApiError, ApiResult};

/// GET /api/faults
///
/// Both fault catalogs, in chart order.
pub async fn list_faults() -> Json<Catalog> {
    Json(knowledge_base().catalog())
}

/// GET /api/faults/:id
///
/// Any id that names no catalog entry, numeric or not, is a 404.
pub async fn get_fault(Path(id): Path<String>) -> ApiResult<Json<FaultRecord>> {
    id.parse::<u16>()
        .ok()
        .and_then(|id| knowledge_base().get(id))
        .copied()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Fault {}", id)))
}
