//! Save template handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    domain::{communication::mailer::Mailer, sending::models::template::MessageTemplate},
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Store the session's message template.
///
/// A running job is unaffected: it renders from the snapshot taken when it
/// started.
#[utoipa::path(
    put,
    operation_id = "save_template",
    tag = "Sessions",
    path = "/api/v1/sessions/{id}/template",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = MessageTemplate,
    responses(
        (status = StatusCode::OK, description = "Template stored", body = MessageTemplate),
        (status = StatusCode::NOT_FOUND, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
    request: Result<Json<MessageTemplate>, JsonRejection>,
) -> Result<Json<MessageTemplate>, ApiError> {
    let Json(template) = request?;

    state.sessions.set_template(id, template.clone()).await?;

    Ok(Json(template))
}
