//! Version 1 of the API

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::communication::mailer::Mailer,
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod sessions;
pub mod stoplight;
pub mod uptime;

/// Route table for `/api/v1`
pub fn router<M: Mailer>() -> Router<AppState<M>> {
    Router::new()
        .route("/", get(stoplight::handler))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler))
        .route("/sessions", post(sessions::create_session::handler))
        .route("/sessions/:id", delete(sessions::clear_session::handler))
        .route(
            "/sessions/:id/credential",
            put(sessions::verify_credential::handler),
        )
        .route(
            "/sessions/:id/recipients",
            put(sessions::update_recipients::handler),
        )
        .route(
            "/sessions/:id/recipients/import",
            post(sessions::import_recipients::handler),
        )
        .route(
            "/sessions/:id/template",
            put(sessions::save_template::handler),
        )
        .route(
            "/sessions/:id/preview",
            post(sessions::preview_template::handler),
        )
        .route("/sessions/:id/send", post(sessions::start_send::handler))
        .route("/sessions/:id/progress", get(sessions::progress::handler))
}
