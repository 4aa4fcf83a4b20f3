//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    communication::errors::TransportError,
    sending::{
        errors::{SessionNotFound, StartSendError},
        models::recipient::RecipientError,
        value_objects::email_address::EmailAddressError,
    },
};

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "Internal server error")]
    pub error: String,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "Internal server error")]
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new not-found error
    pub fn new_404(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create a new conflict error
    pub fn new_409(message: &str) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Create a new unprocessable entity error
    pub fn new_422(message: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Create a new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::new_500(&err.to_string())
    }
}

impl From<EmailAddressError> for ApiError {
    fn from(err: EmailAddressError) -> Self {
        match err {
            EmailAddressError::EmptyEmailAddress => {
                ApiError::new_422("Please provide an email address")
            }
            EmailAddressError::InvalidEmailAddress => {
                ApiError::new_422("Please provide a valid email address")
            }
        }
    }
}

impl From<RecipientError> for ApiError {
    fn from(err: RecipientError) -> Self {
        match err {
            RecipientError::EmptyName => ApiError::new_422("Please provide a recipient name"),
            RecipientError::Email(err) => err.into(),
        }
    }
}

impl From<SessionNotFound> for ApiError {
    fn from(err: SessionNotFound) -> Self {
        ApiError::new_404(&format!("Session \"{}\" not found", err.0))
    }
}

impl From<StartSendError> for ApiError {
    fn from(err: StartSendError) -> Self {
        match err {
            StartSendError::AlreadySending => {
                ApiError::new_409("A send job is already running for this session")
            }
            StartSendError::MissingCredential => {
                ApiError::new_422("Verify a sender credential before sending")
            }
            StartSendError::NoRecipients => {
                ApiError::new_422("Add at least one recipient before sending")
            }
            StartSendError::MissingTemplate => {
                ApiError::new_422("Provide a subject and body before sending")
            }
            StartSendError::SessionNotFound(err) => err.into(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::CredentialsRejected => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "Failed to verify SMTP credentials. Please check your email and app password.",
            ),
            TransportError::Connection(message) => ApiError::new(
                StatusCode::BAD_GATEWAY,
                &format!("Could not reach the SMTP relay: {message}"),
            ),
            TransportError::UnknownError(err) => ApiError::new_500(&err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), &rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use testresult::TestResult;

    use crate::domain::sending::errors::StartSendError;

    use super::ApiError;

    #[tokio::test]
    async fn test_error_response() -> TestResult {
        let error = ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        };

        let response = error.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await?;

        assert_eq!(body, r#"{"error":"Internal server error"}"#);

        Ok(())
    }

    #[test]
    fn test_already_sending_maps_to_conflict() {
        let api_error = ApiError::from(StartSendError::AlreadySending);

        assert_eq!(api_error.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_api_error_from_anyhow_error() {
        let error = anyhow::anyhow!("Internal server error");
        let api_error = ApiError::from(error);

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.message, "Internal server error");
    }
}
