//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::Response,
    response::IntoResponse,
};

use super::errors::ApiError;

pub mod v1;

/// Catch panics and return a 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "Internal server error".to_string());

    ApiError::new_500(&details).into_response()
}
