//! Start send handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{communication::mailer::Mailer, sending::services::dispatcher},
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Start send response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartSendResponse {
    /// Number of recipients the job will dispatch
    #[schema(example = 2)]
    pub total: usize,
}

/// Create a send job for the session and begin dispatching in the
/// background.
///
/// The response returns as soon as the job is installed; progress is
/// observed through the progress stream. At most one job may be dispatching
/// per session.
#[utoipa::path(
    post,
    operation_id = "start_send",
    tag = "Sessions",
    path = "/api/v1/sessions/{id}/send",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = StatusCode::ACCEPTED, description = "Job created, dispatch started", body = StartSendResponse),
        (status = StatusCode::CONFLICT, description = "A job is already running", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Credential, recipients or template missing", body = ErrorResponse),
        (status = StatusCode::NOT_FOUND, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<StartSendResponse>), ApiError> {
    let plan = state.sessions.start_job(id).await?;
    let total = plan.recipients.len();

    dispatcher::spawn_send_job(
        state.sessions.clone(),
        state.mailer.clone(),
        id,
        plan,
        state.config.send_delay(),
    );

    Ok((StatusCode::ACCEPTED, Json(StartSendResponse { total })))
}
