//! Registration routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::{
    ListRegistrationsQuery, ListRegistrationsResponse, RegisterRequest, RegistrationResponse,
};

/// Register a participant for an event.
///
/// POST /api/v1/events/:event_id/registrations
///
/// Returns `409 Conflict` when the email is already registered for the
/// event; a caller retrying after a timeout can treat that as
/// success-already-happened.
pub async fn register(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError> {
    request.validate()?;

    let registration = state
        .registration_service()
        .register(event_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(registration.into())))
}

/// Fetch registration details by token.
///
/// GET /api/v1/registrations/:token
///
/// Used by the ticket page and by staff verifying a registrant manually.
pub async fn get_registration_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let registration = state.registration_service().get_by_token(&token).await?;

    Ok(Json(registration.into()))
}

/// List registrations for an event, newest first.
///
/// GET /api/v1/events/:event_id/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<Json<ListRegistrationsResponse>, ApiError> {
    let response = state
        .registration_service()
        .list(event_id, &query)
        .await?;

    Ok(Json(response))
}
