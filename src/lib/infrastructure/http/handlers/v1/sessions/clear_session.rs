//! Clear session handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    domain::communication::mailer::Mailer,
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Discard the session and everything scoped to it: credential, recipients,
/// template and any send job, finished or not.
#[utoipa::path(
    delete,
    operation_id = "clear_session",
    tag = "Sessions",
    path = "/api/v1/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = StatusCode::NO_CONTENT, description = "Session cleared"),
        (status = StatusCode::NOT_FOUND, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.clear(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
