//! Create session handler

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::communication::mailer::Mailer,
    infrastructure::http::state::AppState,
};

/// Create session response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSessionResponse {
    /// The new session's id, passed in the path of every other call
    pub id: Uuid,
}

/// Create a new operator session
#[utoipa::path(
    post,
    operation_id = "create_session",
    tag = "Sessions",
    path = "/api/v1/sessions",
    responses(
        (status = StatusCode::CREATED, description = "Session created", body = CreateSessionResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let id = state.sessions.create().await;

    (StatusCode::CREATED, Json(CreateSessionResponse { id }))
}
