//! Send progress stream handler

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use uuid::Uuid;

use crate::{
    domain::{communication::mailer::Mailer, sending::models::job::SendJob},
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Observe a session's send progress as a server-sent event stream.
///
/// Every event carries the complete job snapshot, so a dropped or repeated
/// event loses nothing and a reconnecting observer resumes from the current
/// state. The stream ends after the first snapshot with a terminal status,
/// or when the session is cleared. Observers never mutate job state, and
/// any number may watch the same session independently.
#[utoipa::path(
    get,
    operation_id = "observe_progress",
    tag = "Sessions",
    path = "/api/v1/sessions/{id}/progress",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = StatusCode::OK, description = "SSE stream of job snapshots", body = SendJob, content_type = "text/event-stream"),
        (status = StatusCode::NOT_FOUND, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    // reject unknown sessions before committing to a stream response
    state.sessions.get(id).await?;

    let sessions = state.sessions.clone();
    let interval = state.config.progress_interval();

    let stream = async_stream::stream! {
        loop {
            let snapshot = match sessions.job_snapshot(id).await {
                Ok(snapshot) => snapshot,
                // session cleared mid-watch; nothing left to observe
                Err(_) => break,
            };

            let terminal = snapshot.is_terminal();
            let data = serde_json::to_string(&snapshot).unwrap_or_default();
            yield Ok(Event::default().data(data));

            if terminal {
                break;
            }

            tokio::time::sleep(interval).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
