//! Credential capture and verification handler

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
        communication::mailer::Mailer, sending::models::credential::SmtpCredential,
        sending::value_objects::email_address::EmailAddress,
    },
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Verify credential request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyCredentialBody {
    /// The sender's email address
    #[schema(example = "operator@gmail.com")]
    pub email: String,

    /// The sender's app password
    #[schema(example = "abcd efgh ijkl mnop")]
    pub app_password: String,
}

/// Verify credential response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyCredentialResponse {
    /// The verified sender address
    #[schema(example = "operator@gmail.com")]
    pub email: String,

    /// Always true on success
    pub verified: bool,
}

/// Verify an outbound credential against the relay and attach it to the
/// session. Nothing is stored when verification fails.
#[utoipa::path(
    put,
    operation_id = "verify_credential",
    tag = "Sessions",
    path = "/api/v1/sessions/{id}/credential",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = VerifyCredentialBody,
    responses(
        (status = StatusCode::OK, description = "Credential verified and stored", body = VerifyCredentialResponse),
        (status = StatusCode::UNAUTHORIZED, description = "Relay rejected the credentials", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid email address", body = ErrorResponse),
        (status = StatusCode::NOT_FOUND, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
    request: Result<Json<VerifyCredentialBody>, JsonRejection>,
) -> Result<Json<VerifyCredentialResponse>, ApiError> {
    let Json(request) = request?;

    // fail fast before talking to the relay
    state.sessions.get(id).await?;

    let email = EmailAddress::new(&request.email)?;
    let credential = SmtpCredential::new(email, &request.app_password);

    state.mailer.verify(&credential).await?;

    let credential = credential.into_verified();
    let address = credential.email.to_string();
    state.sessions.set_credential(id, credential).await?;

    Ok(Json(VerifyCredentialResponse {
        email: address,
        verified: true,
    }))
}
