//! Session lifecycle and map selection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use truckscout_core::ChatMessage;
use truckscout_data::{resolve, CompanyProfile, MapClick};

use crate::services::{SessionState, SharedSession};
use crate::{ApiError, AppState};

/// What a client sees of a session.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub transcript: Vec<ChatMessage>,
    pub selected_place_id: Option<i64>,
    pub outreach_pending: bool,
    pub outreach_subject: Option<String>,
}

impl SessionSnapshot {
    fn of(id: Uuid, session: &SessionState) -> Self {
        let pending = session.assistant.pending_outreach();
        Self {
            id,
            transcript: session.assistant.transcript().to_vec(),
            selected_place_id: session.selected_place_id,
            outreach_pending: pending.is_some(),
            outreach_subject: pending.map(|a| a.subject.clone()),
        }
    }
}

/// A marker click: layer and position as reported by the map.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectionRequest {
    pub layer_index: usize,
    pub position_index: usize,
    /// Identifier the client saw on the marker; checked against the resolved record.
    #[serde(default)]
    pub expected_place_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub place_id: i64,
    pub category: &'static str,
    pub profile: CompanyProfile,
}

pub(crate) async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, ApiError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Session {} not found", id)))
}

/// POST /api/v1/sessions
#[utoipa::path(post, path = "/api/v1/sessions", tag = "Sessions",
    responses((status = 201, description = "Session created with the greeting transcript")))]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let id = state.sessions.create().await;
    let session = find_session(&state, id).await?;
    let snapshot = SessionSnapshot::of(id, &*session.lock().await);
    info!(session_id = %id, "Session started");
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/{id}
#[utoipa::path(get, path = "/api/v1/sessions/{id}", tag = "Sessions",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Transcript, selection and pending download"),
        (status = 404, description = "Unknown session")))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = find_session(&state, id).await?;
    let snapshot = SessionSnapshot::of(id, &*session.lock().await);
    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/{id}
#[utoipa::path(delete, path = "/api/v1/sessions/{id}", tag = "Sessions",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown session")))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(id).await {
        info!(session_id = %id, "Session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Session {} not found", id)))
    }
}

/// Resolve a marker click, make it the session's selection and return the profile.
///
/// POST /api/v1/sessions/{id}/selection
#[utoipa::path(post, path = "/api/v1/sessions/{id}/selection", tag = "Sessions",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = SelectionRequest,
    responses(
        (status = 200, description = "Selected company profile"),
        (status = 400, description = "Click does not match any marker"),
        (status = 404, description = "Unknown session")))]
pub async fn select_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let session = find_session(&state, id).await?;
    let selection = resolve(
        &state.dataset,
        MapClick {
            layer_index: req.layer_index,
            position_index: req.position_index,
            expected_place_id: req.expected_place_id,
        },
    )?;

    session.lock().await.selected_place_id = Some(selection.place_id);
    info!(session_id = %id, place_id = selection.place_id, "Company selected");

    Ok(Json(SelectionResponse {
        place_id: selection.place_id,
        category: selection.category.label(),
        profile: CompanyProfile::render(selection.record),
    }))
}
