//! CSV recipient import handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{communication::mailer::Mailer, sending::models::recipient::RecipientList},
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Import recipients response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportRecipientsResponse {
    /// Number of recipients imported
    #[schema(example = 2)]
    pub imported: usize,

    /// Number of rows skipped by validation
    #[schema(example = 0)]
    pub skipped: usize,
}

/// Import a `name,email` CSV document as the session's recipient list.
///
/// The request body is the raw CSV text. Invalid rows are skipped and
/// counted; a pasted header line is ignored outright. The import replaces
/// any previously stored list.
#[utoipa::path(
    post,
    operation_id = "import_recipients",
    tag = "Sessions",
    path = "/api/v1/sessions/{id}/recipients/import",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = StatusCode::OK, description = "Recipients imported", body = ImportRecipientsResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "No valid recipients in the document", body = ErrorResponse),
        (status = StatusCode::NOT_FOUND, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
    body: String,
) -> Result<Json<ImportRecipientsResponse>, ApiError> {
    let import = RecipientList::from_csv(&body);

    if import.list.is_empty() {
        return Err(ApiError::new_422(
            "No valid recipients found in CSV file. Expected format: name,email",
        ));
    }

    let imported = import.list.len();
    state.sessions.set_recipients(id, import.list).await?;

    Ok(Json(ImportRecipientsResponse {
        imported,
        skipped: import.skipped,
    }))
}
