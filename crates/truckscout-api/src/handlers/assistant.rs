//! Assistant chat endpoint.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Response, Sse,
    },
    Json,
};
use serde::Deserialize;
use tokio_stream::StreamExt as _;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use truckscout_assistant::reveal_stream;

use crate::handlers::sessions::find_session;
use crate::{ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SendMessageQuery {
    /// Reveal the reply word by word over Server-Sent Events.
    #[serde(default)]
    pub stream: bool,
}

/// Send a message to the assistant.
///
/// Replies that read as a letter are composed into a downloadable email.
/// With `?stream=true` the reply arrives as `word` events followed by one
/// `done` event carrying the full turn.
///
/// POST /api/v1/sessions/{id}/messages
#[utoipa::path(post, path = "/api/v1/sessions/{id}/messages", tag = "Assistant",
    params(("id" = Uuid, Path, description = "Session id"), SendMessageQuery),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Assistant reply and outreach outcome"),
        (status = 400, description = "Empty message"),
        (status = 404, description = "Unknown session"),
        (status = 502, description = "Chat-completion service failed; the user message stays in the transcript")))]
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SendMessageQuery>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Response, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text is required".to_string()));
    }

    let session = find_session(&state, id).await?;
    let turn = {
        let mut guard = session.lock().await;
        let selected = guard
            .selected_place_id
            .and_then(|place_id| state.dataset.find(place_id));
        guard
            .assistant
            .converse(state.chat.as_ref(), &state.composer, &req.text, selected)
            .await?
    };
    info!(
        session_id = %id,
        reply_len = turn.reply.len(),
        outreach = turn.outreach_subject.is_some(),
        "Assistant replied"
    );

    if !query.stream {
        return Ok(Json(turn).into_response());
    }

    let done = Event::default()
        .event("done")
        .json_data(&turn)
        .map_err(|e| ApiError::Internal(format!("Failed to encode turn: {}", e)))?;
    let delay = Duration::from_millis(state.config.word_delay_ms);
    let words = reveal_stream(&turn.reply, delay)
        .map(|word| Ok::<_, Infallible>(Event::default().event("word").data(word.replace('\r', ""))));
    let stream = words.chain(tokio_stream::once(Ok::<_, Infallible>(done)));

    Ok(Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response())
}
