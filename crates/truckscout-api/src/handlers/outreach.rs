//! Outreach letter download.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::handlers::sessions::find_session;
use crate::{ApiError, AppState};

/// Download the most recently composed outreach email.
///
/// GET /api/v1/sessions/{id}/outreach
#[utoipa::path(get, path = "/api/v1/sessions/{id}/outreach", tag = "Assistant",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "RFC 822 email file (message/rfc822)"),
        (status = 404, description = "Unknown session or no letter composed yet")))]
pub async fn download_outreach(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let session = find_session(&state, id).await?;
    let guard = session.lock().await;
    let artifact = guard
        .assistant
        .pending_outreach()
        .ok_or_else(|| ApiError::NotFound("No outreach letter ready for download".to_string()))?;

    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime_type.clone()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes.clone(),
    ))
}
