//! Bulk recipient replacement handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{
        communication::mailer::Mailer,
        sending::models::recipient::{Recipient, RecipientList},
    },
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// A recipient row as submitted by the editor
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipientRow {
    /// Display name
    #[schema(example = "Ann")]
    pub name: String,

    /// Delivery address
    #[schema(example = "a@x.com")]
    pub email: String,
}

/// Update recipients request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRecipientsBody {
    /// The full replacement list, in send order
    pub recipients: Vec<RecipientRow>,
}

/// Update recipients response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRecipientsResponse {
    /// Number of recipients stored after filtering invalid rows
    #[schema(example = 2)]
    pub count: usize,
}

/// Replace the session's recipient list.
///
/// Rows failing validation are filtered out rather than rejected; the
/// response reports how many rows were kept.
#[utoipa::path(
    put,
    operation_id = "update_recipients",
    tag = "Sessions",
    path = "/api/v1/sessions/{id}/recipients",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = UpdateRecipientsBody,
    responses(
        (status = StatusCode::OK, description = "Recipient list replaced", body = UpdateRecipientsResponse),
        (status = StatusCode::NOT_FOUND, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
    request: Result<Json<UpdateRecipientsBody>, JsonRejection>,
) -> Result<Json<UpdateRecipientsResponse>, ApiError> {
    let Json(request) = request?;

    let recipients: Vec<Recipient> = request
        .recipients
        .iter()
        .filter_map(|row| Recipient::new(&row.name, &row.email).ok())
        .collect();

    let count = recipients.len();
    state
        .sessions
        .set_recipients(id, RecipientList::new(recipients))
        .await?;

    Ok(Json(UpdateRecipientsResponse { count }))
}
