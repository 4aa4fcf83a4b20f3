//! Template preview handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    domain::{
        communication::mailer::Mailer,
        sending::models::{
            recipient::Recipient,
            template::{MessageTemplate, RenderedMessage},
        },
    },
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Render the submitted template against the session's first recipient, or
/// against the sample identity when the list is empty.
///
/// A side-effect-free read: neither the submitted template nor the
/// rendering is stored, and no job state is touched.
#[utoipa::path(
    post,
    operation_id = "preview_template",
    tag = "Sessions",
    path = "/api/v1/sessions/{id}/preview",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = MessageTemplate,
    responses(
        (status = StatusCode::OK, description = "Rendered preview", body = RenderedMessage),
        (status = StatusCode::NOT_FOUND, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn handler<M: Mailer>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
    request: Result<Json<MessageTemplate>, JsonRejection>,
) -> Result<Json<RenderedMessage>, ApiError> {
    let Json(template) = request?;

    let session = state.sessions.get(id).await?;
    let sample = session
        .recipients
        .first()
        .cloned()
        .unwrap_or_else(Recipient::sample);

    Ok(Json(template.render(&sample)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::sending::models::{
            recipient::{Recipient, RecipientList},
            template::{MessageTemplate, RenderedMessage},
        },
        infrastructure::http::{router, state::test_state},
    };

    #[tokio::test]
    async fn test_preview_renders_against_the_first_recipient() -> TestResult {
        let state = test_state(None);
        let sessions = state.sessions.clone();
        let id = sessions.create().await;
        sessions
            .set_recipients(
                id,
                RecipientList::new(vec![
                    Recipient::new("Ann", "a@x.com")?,
                    Recipient::new("Bo", "b@x.com")?,
                ]),
            )
            .await?;

        let response = TestServer::new(router(state))?
            .post(&format!("/api/v1/sessions/{id}/preview"))
            .json(&MessageTemplate::new("Hi {{name}}", "Hello {{name}}!"))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let json = response.json::<RenderedMessage>();
        assert_eq!(json.subject, "Hi Ann");
        assert_eq!(json.body, "Hello Ann!");

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_falls_back_to_the_sample_identity() -> TestResult {
        let state = test_state(None);
        let id = state.sessions.create().await;

        let response = TestServer::new(router(state))?
            .post(&format!("/api/v1/sessions/{id}/preview"))
            .json(&MessageTemplate::new("Hi {{name}}", "Hello {{name}}!"))
            .await;

        assert_eq!(response.json::<RenderedMessage>().subject, "Hi Sample Name");

        Ok(())
    }

    #[tokio::test]
    async fn test_preview_stores_nothing() -> TestResult {
        let state = test_state(None);
        let sessions = state.sessions.clone();
        let id = sessions.create().await;

        let server = TestServer::new(router(state))?;
        let template = MessageTemplate::new("Hi {{name}}", "Hello {{name}}!");

        let first = server
            .post(&format!("/api/v1/sessions/{id}/preview"))
            .json(&template)
            .await;
        let second = server
            .post(&format!("/api/v1/sessions/{id}/preview"))
            .json(&template)
            .await;

        // identical inputs render identically, and the session is untouched
        assert_eq!(
            first.json::<RenderedMessage>(),
            second.json::<RenderedMessage>()
        );

        let session = sessions.get(id).await?;
        assert_eq!(session.template, MessageTemplate::default());
        assert!(!session.job.is_sending());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() -> TestResult {
        let response = TestServer::new(router(test_state(None)))?
            .post(&format!("/api/v1/sessions/{}/preview", Uuid::now_v7()))
            .json(&MessageTemplate::new("s", "b"))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
