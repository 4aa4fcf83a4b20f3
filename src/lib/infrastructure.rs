//! Infrastructure layer: HTTP surface and SMTP transport

pub mod email;
pub mod http;
