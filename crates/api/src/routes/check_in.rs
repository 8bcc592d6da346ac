//! Check-in routes.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::{CheckInOutcome, CheckInRequest, CheckInStatsResponse};

/// Check a scanned token in against an event.
///
/// POST /api/v1/events/:event_id/check-in
///
/// Always `200` with a discriminated `{outcome, ...}` body: a duplicate
/// scan or a wrong-gate scan is a routine occurrence at an entrance, not
/// an error.
pub async fn check_in(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<CheckInOutcome>, ApiError> {
    request.validate()?;

    let outcome = state
        .check_in_service()
        .check_in(event_id, &request.token)
        .await?;

    Ok(Json(outcome))
}

/// Live check-in statistics for an event.
///
/// GET /api/v1/events/:event_id/check-in/stats
pub async fn check_in_stats(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<CheckInStatsResponse>, ApiError> {
    let stats = state.check_in_service().stats(event_id).await?;

    Ok(Json(stats))
}
