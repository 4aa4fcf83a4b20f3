//! OpenAPI module

use utoipa::OpenApi;

use crate::domain::sending::models::{
    job::{JobStatus, SendFailure, SendJob},
    template::{MessageTemplate, RenderedMessage},
};
use crate::infrastructure::http::{errors::ErrorResponse, handlers::v1::*};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Bulk Mailer"),
    paths(
        sessions::create_session::handler,
        sessions::clear_session::handler,
        sessions::verify_credential::handler,
        sessions::update_recipients::handler,
        sessions::import_recipients::handler,
        sessions::save_template::handler,
        sessions::preview_template::handler,
        sessions::start_send::handler,
        sessions::progress::handler,
        uptime::handler
    ),
    components(schemas(
        sessions::create_session::CreateSessionResponse,
        sessions::verify_credential::VerifyCredentialBody,
        sessions::verify_credential::VerifyCredentialResponse,
        sessions::update_recipients::RecipientRow,
        sessions::update_recipients::UpdateRecipientsBody,
        sessions::update_recipients::UpdateRecipientsResponse,
        sessions::import_recipients::ImportRecipientsResponse,
        sessions::start_send::StartSendResponse,
        MessageTemplate,
        RenderedMessage,
        SendJob,
        SendFailure,
        JobStatus,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
